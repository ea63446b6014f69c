//! Byte-level fixture builders shared by the integration tests.
//!
//! Every container here is assembled by hand, without going through the
//! library's encoders, so the tests compare against independent bytes.
#![allow(dead_code)]

pub const VENDOR: &str = "reference libFLAC 1.4.2 20221022";

pub const COMMENTS: [(&str, &str); 7] = [
    ("TITLE", "町かどタンジェント"),
    ("ARTIST", "shami momo (小原好美, 鬼頭明里)"),
    ("ALBUM", "町かどタンジェント / よいまちカンターレ"),
    ("ALBUMARTIST", "shami momo (小原好美, 鬼頭明里)"),
    ("TRACKNUMBER", "1"),
    ("ISRC", "JPPC01901215"),
    ("DATE", "2019"),
];

/// 4096/4096 block size, 16/16 frame size, 48 kHz, 2 channels, 16 bits,
/// 3840 samples, MD5 c911a195060b81c9af5252726a42ccf7
pub const STREAM_INFO: [u8; 34] = [
    0x10, 0x00, 0x10, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x10, 0x0B, 0xB8, 0x02, 0xF0, 0x00,
    0x00, 0x0F, 0x00, 0xC9, 0x11, 0xA1, 0x95, 0x06, 0x0B, 0x81, 0xC9, 0xAF, 0x52, 0x52, 0x72,
    0x6A, 0x42, 0xCC, 0xF7,
];

pub const SIGNATURE: &str = "c911a195060b81c9af5252726a42ccf7";

/// One seek point: sample 0, offset 0, 3840 samples
pub const SEEK_TABLE: [u8; 18] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x0F, 0x00,
];

/// Stand-in for the encoded audio frames (starts with a frame sync code)
pub const AUDIO: [u8; 16] = [
    0xFF, 0xF8, 0x69, 0x08, 0x00, 0x0F, 0x7E, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x5C,
];

pub const FIXTURE_PADDING: usize = 7113;

pub const TYPE_STREAM_INFO: u8 = 0;
pub const TYPE_PADDING: u8 = 1;
pub const TYPE_SEEK_TABLE: u8 = 3;
pub const TYPE_VORBIS_COMMENT: u8 = 4;
pub const TYPE_PICTURE: u8 = 6;

/// 1x1 RGB PNG
pub fn png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0xCF, 0xC0, 0x00, 0x00, 0x03, 0x01, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0xB0, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// 2x2 indexed PNG with a 4-entry palette
pub fn indexed_png() -> Vec<u8> {
    let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    data.extend_from_slice(&[0x00, 0x00, 0x00, 0x0D]);
    data.extend_from_slice(b"IHDR");
    data.extend_from_slice(&[0, 0, 0, 2, 0, 0, 0, 2, 2, 3, 0, 0, 0]);
    data.extend_from_slice(&[0, 0, 0, 0]);
    data.extend_from_slice(&[0x00, 0x00, 0x00, 0x0C]);
    data.extend_from_slice(b"PLTE");
    data.extend_from_slice(&[0xFF, 0, 0, 0, 0xFF, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
    data.extend_from_slice(&[0, 0, 0, 0]);
    data.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    data.extend_from_slice(b"IEND");
    data.extend_from_slice(&[0xAE, 0x42, 0x60, 0x82]);
    data
}

/// 1x1 baseline JPEG header (JFIF APP0, then SOF0 with 3 components)
pub fn jpeg() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    data.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
    data.extend_from_slice(b"JFIF\0");
    data.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00]);
    data.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x01, 0x00, 0x01, 0x03]);
    data.extend_from_slice(&[0x01, 0x11, 0x00, 0x02, 0x11, 0x01, 0x03, 0x11, 0x01]);
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

/// 1x1 GIF with a 2-entry global colour table
pub fn gif() -> Vec<u8> {
    let mut data = b"GIF89a".to_vec();
    data.extend_from_slice(&[0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00]);
    data.extend_from_slice(&[0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF]);
    data.extend_from_slice(&[0x2C, 0, 0, 0, 0, 0x01, 0x00, 0x01, 0x00, 0x00]);
    data.extend_from_slice(&[0x02, 0x02, 0x44, 0x01, 0x00, 0x3B]);
    data
}

pub fn block(block_type: u8, is_last: bool, body: &[u8]) -> Vec<u8> {
    let length = body.len() as u32;
    let mut data = vec![if is_last { 0x80 | block_type } else { block_type }];
    data.extend_from_slice(&length.to_be_bytes()[1..]);
    data.extend_from_slice(body);
    data
}

/// Magic, the given blocks, then `audio`
pub fn flac(blocks: &[Vec<u8>], audio: &[u8]) -> Vec<u8> {
    let mut data = b"fLaC".to_vec();
    for block in blocks {
        data.extend_from_slice(block);
    }
    data.extend_from_slice(audio);
    data
}

fn push_le_string(out: &mut Vec<u8>, value: &str) {
    out.extend_from_slice(&(value.len() as u32).to_le_bytes());
    out.extend_from_slice(value.as_bytes());
}

fn push_be_string(out: &mut Vec<u8>, value: &[u8]) {
    out.extend_from_slice(&(value.len() as u32).to_be_bytes());
    out.extend_from_slice(value);
}

pub fn vorbis_comment_body(vendor: &str, comments: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    push_le_string(&mut body, vendor);
    body.extend_from_slice(&(comments.len() as u32).to_le_bytes());
    for (field, value) in comments {
        push_le_string(&mut body, &format!("{}={}", field, value));
    }
    body
}

pub struct PictureFields<'a> {
    pub picture_type: u32,
    pub mime_type: &'a str,
    pub description: &'a str,
    pub width: u32,
    pub height: u32,
    pub color_depth: u32,
    pub used_colors: u32,
    pub data: &'a [u8],
}

pub fn picture_body(fields: &PictureFields<'_>) -> Vec<u8> {
    let mut body = fields.picture_type.to_be_bytes().to_vec();
    push_be_string(&mut body, fields.mime_type.as_bytes());
    push_be_string(&mut body, fields.description.as_bytes());
    body.extend_from_slice(&fields.width.to_be_bytes());
    body.extend_from_slice(&fields.height.to_be_bytes());
    body.extend_from_slice(&fields.color_depth.to_be_bytes());
    body.extend_from_slice(&fields.used_colors.to_be_bytes());
    push_be_string(&mut body, fields.data);
    body
}

/// Only STREAMINFO in front of the audio
pub fn no_metadata() -> Vec<u8> {
    flac(&[block(TYPE_STREAM_INFO, true, &STREAM_INFO)], &AUDIO)
}

/// STREAMINFO, SEEKTABLE, VORBIS_COMMENT, PNG front cover, JPEG back cover and
/// 7113 bytes of padding, in that order, in front of the same audio as
/// [`no_metadata`]
pub fn fixture() -> Vec<u8> {
    let png = png();
    let jpeg = jpeg();
    let front = picture_body(&PictureFields {
        picture_type: 3,
        mime_type: "image/png",
        description: "",
        width: 1,
        height: 1,
        color_depth: 24,
        used_colors: 0,
        data: &png,
    });
    let back = picture_body(&PictureFields {
        picture_type: 4,
        mime_type: "image/jpeg",
        description: "back cover",
        width: 1,
        height: 1,
        color_depth: 24,
        used_colors: 0,
        data: &jpeg,
    });

    flac(
        &[
            block(TYPE_STREAM_INFO, false, &STREAM_INFO),
            block(TYPE_SEEK_TABLE, false, &SEEK_TABLE),
            block(TYPE_VORBIS_COMMENT, false, &vorbis_comment_body(VENDOR, &COMMENTS)),
            block(TYPE_PICTURE, false, &front),
            block(TYPE_PICTURE, false, &back),
            block(TYPE_PADDING, true, &[0; FIXTURE_PADDING]),
        ],
        &AUDIO,
    )
}
