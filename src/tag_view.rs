// Canonical tag view over FLAC metadata
//
// Maps a closed set of well-known tag names onto the free-form Vorbis comment
// list, and manages attached pictures. No binary encoding happens here; the
// view only edits the `Metadata` aggregate in place.

use crate::error::Result;
use crate::flac::{Comment, Metadata, Picture, PictureType, VorbisComment};
use crate::image::sniff_image;

/// Canonical tag fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagField {
    Title,
    Version,
    Album,
    TrackNumber,
    Artist,
    Performer,
    Copyright,
    License,
    Organization,
    Description,
    Genre,
    Date,
    Location,
    Contact,
    Isrc,
    AlbumArtist,
    TrackTotal,
    DiscTotal,
    DiscNumber,
    Composer,
    Lyrics,
}

impl TagField {
    pub const ALL: [TagField; 21] = [
        TagField::Title,
        TagField::Version,
        TagField::Album,
        TagField::TrackNumber,
        TagField::Artist,
        TagField::Performer,
        TagField::Copyright,
        TagField::License,
        TagField::Organization,
        TagField::Description,
        TagField::Genre,
        TagField::Date,
        TagField::Location,
        TagField::Contact,
        TagField::Isrc,
        TagField::AlbumArtist,
        TagField::TrackTotal,
        TagField::DiscTotal,
        TagField::DiscNumber,
        TagField::Composer,
        TagField::Lyrics,
    ];

    /// Vorbis comment key (upper case)
    pub fn key(&self) -> &'static str {
        match self {
            TagField::Title => "TITLE",
            TagField::Version => "VERSION",
            TagField::Album => "ALBUM",
            TagField::TrackNumber => "TRACKNUMBER",
            TagField::Artist => "ARTIST",
            TagField::Performer => "PERFORMER",
            TagField::Copyright => "COPYRIGHT",
            TagField::License => "LICENSE",
            TagField::Organization => "ORGANIZATION",
            TagField::Description => "DESCRIPTION",
            TagField::Genre => "GENRE",
            TagField::Date => "DATE",
            TagField::Location => "LOCATION",
            TagField::Contact => "CONTACT",
            TagField::Isrc => "ISRC",
            TagField::AlbumArtist => "ALBUMARTIST",
            TagField::TrackTotal => "TRACKTOTAL",
            TagField::DiscTotal => "DISCTOTAL",
            TagField::DiscNumber => "DISCNUMBER",
            TagField::Composer => "COMPOSER",
            TagField::Lyrics => "LYRICS",
        }
    }

    /// Alternative key some taggers write instead of `key()`
    pub fn alias(&self) -> Option<&'static str> {
        match self {
            TagField::AlbumArtist => Some("ALBUM ARTIST"),
            _ => None,
        }
    }

    /// Parse a field name case-insensitively, accepting comment keys and
    /// their snake_case spellings (`album_artist`, `tracknumber`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | ' ' | '-'))
            .collect::<String>()
            .to_uppercase();
        match normalized.as_str() {
            "TRACK" => Some(TagField::TrackNumber),
            "YEAR" => Some(TagField::Date),
            other => Self::ALL.into_iter().find(|field| field.key() == other),
        }
    }

    fn matches(&self, comment_field: &str) -> bool {
        comment_field.eq_ignore_ascii_case(self.key())
            || self.alias().is_some_and(|alias| comment_field.eq_ignore_ascii_case(alias))
    }
}

/// Picture to attach. Fields left as `None` (or zero) are filled in by
/// sniffing `data`.
#[derive(Debug, Clone, Default)]
pub struct PictureAttachment {
    pub picture_type: Option<PictureType>,
    pub data: Vec<u8>,
    pub mime_type: Option<String>,
    pub description: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub color_depth: Option<u32>,
    pub used_colors: Option<u32>,
}

impl PictureAttachment {
    pub fn new(picture_type: PictureType, data: Vec<u8>) -> Self {
        PictureAttachment {
            picture_type: Some(picture_type),
            data,
            ..Default::default()
        }
    }

    fn is_complete(&self) -> bool {
        let present = |value: Option<u32>| value.is_some_and(|v| v != 0);
        self.mime_type.as_deref().is_some_and(|mime| !mime.is_empty())
            && present(self.width)
            && present(self.height)
            && present(self.color_depth)
            && present(self.used_colors)
    }

    fn into_picture(self) -> Result<Picture> {
        let sniffed = if self.is_complete() {
            None
        } else {
            Some(sniff_image(&self.data)?)
        };
        let pick = |explicit: Option<u32>, sniffed: Option<u32>| explicit.or(sniffed).unwrap_or(0);

        Ok(Picture {
            picture_type: self.picture_type.unwrap_or(PictureType::FrontCover),
            mime_type: self
                .mime_type
                .or_else(|| sniffed.as_ref().map(|s| s.mime_type.clone()))
                .unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            width: pick(self.width, sniffed.as_ref().map(|s| s.width)),
            height: pick(self.height, sniffed.as_ref().map(|s| s.height)),
            color_depth: pick(self.color_depth, sniffed.as_ref().map(|s| s.color_depth)),
            used_colors: pick(self.used_colors, sniffed.as_ref().map(|s| s.used_colors)),
            data: self.data,
        })
    }
}

/// Mutable view of a [`Metadata`] through canonical tag names
pub struct TagView<'a> {
    metadata: &'a mut Metadata,
}

impl<'a> TagView<'a> {
    /// Create the view, adding an empty comment block if there is none
    pub fn new(metadata: &'a mut Metadata) -> Self {
        metadata.vorbis_comment.get_or_insert_with(VorbisComment::default);
        TagView { metadata }
    }

    fn comments(&self) -> &[Comment] {
        match &self.metadata.vorbis_comment {
            Some(vorbis) => &vorbis.comments,
            None => &[],
        }
    }

    fn comments_mut(&mut self) -> &mut Vec<Comment> {
        &mut self
            .metadata
            .vorbis_comment
            .get_or_insert_with(VorbisComment::default)
            .comments
    }

    /// Value of the first comment for `field`. The primary key is preferred
    /// over an alias.
    pub fn get(&self, field: TagField) -> Option<&str> {
        let find = |key: &str| {
            self.comments()
                .iter()
                .find(|c| c.field.eq_ignore_ascii_case(key))
                .map(|c| c.value.as_str())
        };
        find(field.key()).or_else(|| field.alias().and_then(find))
    }

    /// Every value stored under `field`, in order
    pub fn get_all(&self, field: TagField) -> Vec<&str> {
        self.comments()
            .iter()
            .filter(|c| field.matches(&c.field))
            .map(|c| c.value.as_str())
            .collect()
    }

    /// Replace the first value of `field`, or append it under the lower-case
    /// key. `None` removes every comment for the field.
    pub fn set(&mut self, field: TagField, value: Option<&str>) {
        self.set_key(field.key(), value);
        if let Some(alias) = field.alias() {
            self.set_key(alias, value);
        }
    }

    fn set_key(&mut self, key: &str, value: Option<&str>) {
        let comments = self.comments_mut();
        let Some(value) = value else {
            comments.retain(|c| !c.field.eq_ignore_ascii_case(key));
            return;
        };

        match comments.iter_mut().find(|c| c.field.eq_ignore_ascii_case(key)) {
            Some(comment) => comment.value = value.to_string(),
            None => comments.push(Comment::new(key.to_lowercase(), value)),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.get(TagField::Title)
    }

    pub fn artist(&self) -> Option<&str> {
        self.get(TagField::Artist)
    }

    pub fn album(&self) -> Option<&str> {
        self.get(TagField::Album)
    }

    pub fn album_artist(&self) -> Option<&str> {
        self.get(TagField::AlbumArtist)
    }

    pub fn date(&self) -> Option<&str> {
        self.get(TagField::Date)
    }

    pub fn genre(&self) -> Option<&str> {
        self.get(TagField::Genre)
    }

    /// Append each genre not already present. `None` removes all genres.
    pub fn set_genres(&mut self, values: Option<&[&str]>) {
        let Some(values) = values else {
            self.set(TagField::Genre, None);
            return;
        };

        let existing: Vec<String> = self
            .get_all(TagField::Genre)
            .into_iter()
            .map(str::to_string)
            .collect();
        let key = TagField::Genre.key().to_lowercase();
        for value in values {
            if !existing.iter().any(|e| e == value) {
                self.comments_mut().push(Comment::new(key.clone(), *value));
            }
        }
    }

    fn number(&self, field: TagField) -> Option<u32> {
        parse_leading_int(self.get(field)?)
    }

    pub fn track(&self) -> Option<u32> {
        self.number(TagField::TrackNumber)
    }

    pub fn set_track(&mut self, track: Option<u32>) {
        let value = track.map(|n| n.to_string());
        self.set(TagField::TrackNumber, value.as_deref());
    }

    pub fn track_total(&self) -> Option<String> {
        self.number(TagField::TrackTotal).map(|n| n.to_string())
    }

    pub fn disc_number(&self) -> Option<String> {
        self.number(TagField::DiscNumber).map(|n| n.to_string())
    }

    pub fn disc_total(&self) -> Option<String> {
        self.number(TagField::DiscTotal).map(|n| n.to_string())
    }

    pub fn find_picture(&self, picture_type: PictureType) -> Option<&Picture> {
        self.metadata
            .pictures
            .iter()
            .find(|p| p.picture_type == picture_type)
    }

    /// Attach a picture, replacing the first one of the same type.
    ///
    /// If sniffing is needed and fails, the metadata is left unchanged.
    pub fn attach_picture(&mut self, attachment: PictureAttachment) -> Result<()> {
        let picture = attachment.into_picture()?;
        match self
            .metadata
            .pictures
            .iter_mut()
            .find(|p| p.picture_type == picture.picture_type)
        {
            Some(existing) => *existing = picture,
            None => self.metadata.pictures.push(picture),
        }
        Ok(())
    }

    pub fn remove_picture(&mut self, picture_type: PictureType) {
        self.metadata.pictures.retain(|p| p.picture_type != picture_type);
    }

    pub fn remove_all_pictures(&mut self) {
        self.metadata.pictures.clear();
    }
}

/// Leading decimal digits of `value` ("3/12" -> 3)
fn parse_leading_int(value: &str) -> Option<u32> {
    let trimmed = value.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
