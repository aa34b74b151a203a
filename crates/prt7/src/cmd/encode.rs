use prt7_frame::encode_message;

use crate::cmd::EncodeArgs;
use crate::exit::{encode_error, CliResult, SUCCESS};
use crate::output::{print_script, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let frames =
        encode_message(&args.text, &args.rotate).map_err(|err| encode_error("encode failed", err))?;
    print_script(&frames, format);
    Ok(SUCCESS)
}
