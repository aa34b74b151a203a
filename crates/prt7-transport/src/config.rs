/// Baud rate used by the reference transmitter.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Baud rates accepted by [`SerialConfig`].
pub const SUPPORTED_BAUD_RATES: [u32; 8] = [1200, 2400, 4800, 9600, 19200, 38400, 57600, 115200];

/// Line settings for a serial device.
///
/// Framing is fixed at 8 data bits, no parity, one stop bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConfig {
    /// Input and output speed in bits per second. Default: 9600.
    pub baud_rate: u32,
}

impl SerialConfig {
    /// Create a config for the given baud rate.
    pub fn with_baud_rate(baud_rate: u32) -> Self {
        Self { baud_rate }
    }

    /// Returns true if the baud rate is one of [`SUPPORTED_BAUD_RATES`].
    pub fn is_supported(&self) -> bool {
        SUPPORTED_BAUD_RATES.contains(&self.baud_rate)
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_9600() {
        assert_eq!(SerialConfig::default().baud_rate, 9600);
        assert!(SerialConfig::default().is_supported());
    }

    #[test]
    fn rejects_odd_rates() {
        assert!(!SerialConfig::with_baud_rate(9601).is_supported());
        assert!(!SerialConfig::with_baud_rate(0).is_supported());
        assert!(SerialConfig::with_baud_rate(115200).is_supported());
    }
}
