//! flacmeta - read and rewrite FLAC metadata blocks
//!
//! [`parse`] decodes the metadata region of a FLAC file into a [`Metadata`]
//! aggregate, [`dump`] writes it back in front of the untouched audio frames,
//! and [`sniff_image`] derives picture dimensions from raw JPEG, PNG or GIF
//! bytes. [`TagView`] edits the aggregate through canonical tag names.

pub mod error;
pub mod flac;
pub mod image;
pub mod tag_view;
mod utils;

pub use error::{Error, Result};
pub use flac::{
    dump, parse, Comment, DumpOptions, Metadata, Picture, PictureType, SeekPoint, SeekTable,
    StreamInfo, VorbisComment,
};
pub use image::{sniff_image, PictureMetadata};
pub use tag_view::{PictureAttachment, TagField, TagView};
