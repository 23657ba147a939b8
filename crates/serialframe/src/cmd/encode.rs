use std::fs;

use serialframe_frame::Message;
use serialframe_protocol::ProtocolAdapter;

use crate::cmd::{parse_hex, EncodeArgs};
use crate::exit::{io_error, protocol_error, CliResult, SUCCESS};
use crate::output::print_frame;

pub fn run(args: EncodeArgs) -> CliResult<i32> {
    let payload = resolve_payload(&args)?;
    let message = build_message(&args, payload);
    let adapter = args.wire.protocol.build();

    let frame = adapter
        .encode(&message)
        .map_err(|err| protocol_error("encode failed", err))?;
    tracing::debug!(
        index = message.index,
        adapter = adapter.name(),
        frame_len = frame.len(),
        "encoded frame"
    );

    print_frame(&frame, args.output);
    Ok(SUCCESS)
}

fn build_message(args: &EncodeArgs, payload: Vec<u8>) -> Message {
    if args.wire.index_only {
        Message::untyped(args.index, payload)
    } else {
        Message::new(args.index, args.message_type, payload)
    }
}

fn resolve_payload(args: &EncodeArgs) -> CliResult<Vec<u8>> {
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(hex) = &args.hex {
        return parse_hex(hex);
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Ok(Vec::new())
}
