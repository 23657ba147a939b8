//! Loopback over a local TCP socket standing in for a serial line.
//!
//! The "device" side answers every command with a response carrying the same
//! index. The host side writes frames from the main thread and reads replies
//! on a dedicated receiver thread. Both ends use the shift adapter.
//!
//! Run with:
//!   cargo run --example loopback

use std::net::{Shutdown, TcpListener, TcpStream};
use std::time::Duration;

use serialframe::frame::{FrameConfig, FrameWriter, Message, MessageType};
use serialframe::link::{spawn_receiver, Link, LinkError};
use serialframe::protocol::{AdapterConfig, MessageFactory, ProtocolAdapter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = FrameConfig::default();
    let adapter = AdapterConfig::Shift { key: 0x07 }.build();

    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;

    let device_adapter = adapter.clone();
    let device = std::thread::spawn(move || -> Result<usize, LinkError> {
        let (stream, _) = listener.accept()?;
        let mut link = Link::new(stream.try_clone()?, stream, device_adapter, config);
        let mut answered = 0;
        loop {
            let request = match link.recv() {
                Ok(message) => message,
                Err(LinkError::Disconnected(_)) => return Ok(answered),
                Err(err) => return Err(err),
            };
            eprintln!("device <- {request}");
            let text = format!("ack {}", String::from_utf8_lossy(&request.payload));
            let reply = Message::new(request.index, MessageType::Response, text.into_bytes());
            link.send(&reply)?;
            answered += 1;
        }
    });

    let host = TcpStream::connect(addr)?;
    let mut writer = FrameWriter::with_config(host.try_clone()?, config);
    let replies = spawn_receiver(host, config, adapter.clone())?;

    let factory = MessageFactory::default();
    let commands = ["status", "led on", "led off"];
    for text in commands {
        let message = factory.command(text);
        eprintln!("host   -> {message}");
        writer.write_frame_bytes(&adapter.encode(&message)?)?;
    }

    for _ in commands {
        let reply = replies.recv_timeout(Duration::from_secs(2))?;
        println!("{reply}");
    }

    writer.get_ref().shutdown(Shutdown::Write)?;
    let answered = device.join().map_err(|_| "device thread panicked")??;
    replies.join()?;
    eprintln!("device answered {answered} commands");
    Ok(())
}
