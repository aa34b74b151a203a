use prt7_frame::parse_frame;

use crate::cmd::ParseArgs;
use crate::exit::{CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_parse_reports, OutputFormat, ParseReport};

/// Parse each line without decoding. Exits with `DATA_INVALID` if any line
/// was rejected.
pub fn run(args: ParseArgs, format: OutputFormat) -> CliResult<i32> {
    let reports: Vec<ParseReport> = args
        .lines
        .iter()
        .map(|line| ParseReport::new(line, &parse_frame(line)))
        .collect();

    print_parse_reports(&reports, format);

    if reports.iter().all(|r| r.ok) {
        Ok(SUCCESS)
    } else {
        Ok(DATA_INVALID)
    }
}
