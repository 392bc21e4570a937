//! Build a produce-style request body and print it as hex.
//!
//! Run with: `cargo run --example build_request`

use kafwire::{Encoder, Result};

fn main() -> Result<()> {
    let mut record = Encoder::new();
    record.put_varint64(0);
    record.put_varint_string(Some("hello, broker"))?;

    let mut partition = Encoder::new();
    partition.put_i32(0);
    partition.put_varint_array(std::slice::from_ref(&record))?;

    let mut topic = Encoder::new();
    topic.put_string(Some("demo-topic"))?;
    topic.put_i32(1).put_encoder(&partition);

    let mut body = Encoder::new();
    body.put_i16(0) // api_key: produce
        .put_i16(2) // api_version
        .put_i32(1); // correlation_id
    body.put_string(Some("demo-client"))?;
    body.put_i32(1).put_encoder(&topic);

    // The outer size prefix is the caller's framing, not the encoder's.
    let mut frame = Encoder::new();
    frame.put_i32(body.len() as i32).put_encoder(&body);

    println!("frame ({} bytes):", frame.len());
    for chunk in frame.as_bytes().chunks(16) {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02X}")).collect();
        println!("  {}", hex.join(" "));
    }

    Ok(())
}
