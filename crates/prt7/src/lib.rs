//! Decoder for PRT-7 rotor-cipher transmissions.
//!
//! A device sends one frame per line over a serial link. Load frames carry a
//! ciphertext character, rotate frames turn a 27-symbol substitution rotor.
//! This crate ties the pieces together.
//!
//! # Crate Structure
//!
//! - [`transport`] — Line sources (serial TTY, capture file, stdin)
//! - [`frame`] — Frame grammar, rotor, message buffer and decoding session

/// Re-export transport types.
pub mod transport {
    pub use prt7_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use prt7_frame::*;
}
