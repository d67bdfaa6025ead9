//! Loader-level scenarios built from in-memory glTF JSON documents with
//! embedded base64 buffers.

mod skin_test;

/// Route `log` output through the test harness for scenarios that warn.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Standard-alphabet base64 encoder for embedding test buffers.
fn base64_encode(data: &[u8]) -> String {
    const TABLE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

    let mut encoded = String::with_capacity(data.len().div_ceil(3) * 4);
    for chunk in data.chunks(3) {
        let mut bits = (chunk[0] as u32) << 16;
        if let Some(&b) = chunk.get(1) {
            bits |= (b as u32) << 8;
        }
        if let Some(&b) = chunk.get(2) {
            bits |= b as u32;
        }

        encoded.push(TABLE[(bits >> 18) as usize & 0x3f] as char);
        encoded.push(TABLE[(bits >> 12) as usize & 0x3f] as char);
        encoded.push(if chunk.len() > 1 {
            TABLE[(bits >> 6) as usize & 0x3f] as char
        } else {
            '='
        });
        encoded.push(if chunk.len() > 2 {
            TABLE[bits as usize & 0x3f] as char
        } else {
            '='
        });
    }
    encoded
}

/// Wrap raw bytes into a buffer data URI.
fn buffer_uri(data: &[u8]) -> String {
    format!(
        "data:application/octet-stream;base64,{}",
        base64_encode(data)
    )
}

fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn u16_bytes(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

#[test]
fn base64_encoder_matches_decoder_expectations() {
    assert_eq!(base64_encode(b"Hello World"), "SGVsbG8gV29ybGQ=");
    assert_eq!(base64_encode(b"a"), "YQ==");
    assert_eq!(base64_encode(&[1, 2, 3]), "AQID");
}
