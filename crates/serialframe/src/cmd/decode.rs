use std::fs::File;
use std::io::{Cursor, Read};

use serialframe_link::spawn_receiver;
use serialframe_protocol::ProtocolAdapter;

use crate::cmd::{parse_hex, DecodeArgs};
use crate::exit::{io_error, link_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_message, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let source = open_source(&args)?;
    let config = args.wire.frame_config();
    let adapter = args.wire.protocol.build();
    let adapter_name = adapter.name();

    let handle =
        spawn_receiver(source, config, adapter).map_err(|err| link_error("spawn failed", err))?;

    let mut printed = 0usize;
    let mut rejected = 0usize;
    for item in handle.iter() {
        match item {
            Ok(message) => {
                print_message(&message, adapter_name, format);
                printed = printed.saturating_add(1);
                if args.count.is_some_and(|count| printed >= count) {
                    // The reader thread may be parked on stdin; leave it behind.
                    return Ok(exit_code(rejected));
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "dropped malformed frame");
                rejected = rejected.saturating_add(1);
            }
        }
    }

    handle
        .join()
        .map_err(|err| link_error("read failed", err))?;
    tracing::debug!(printed, rejected, "input exhausted");
    Ok(exit_code(rejected))
}

fn exit_code(rejected: usize) -> i32 {
    if rejected > 0 {
        DATA_INVALID
    } else {
        SUCCESS
    }
}

fn open_source(args: &DecodeArgs) -> CliResult<Box<dyn Read + Send>> {
    let mut source: Box<dyn Read + Send> = match &args.path {
        Some(path) => Box::new(
            File::open(path)
                .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?,
        ),
        None => Box::new(std::io::stdin()),
    };

    if !args.hex {
        return Ok(source);
    }

    let mut text = String::new();
    source
        .read_to_string(&mut text)
        .map_err(|err| io_error("failed reading hex input", err))?;
    Ok(Box::new(Cursor::new(parse_hex(&text)?)))
}
