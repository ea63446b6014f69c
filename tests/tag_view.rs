mod common;

use common::*;
use flacmeta::{
    dump, parse, sniff_image, Comment, DumpOptions, Error, PictureAttachment, PictureType,
    TagField, TagView,
};

#[test]
fn test_read_tags_and_pictures() {
    let mut metadata = parse(&fixture()).unwrap();
    let view = TagView::new(&mut metadata);

    assert_eq!(view.title(), Some("町かどタンジェント"));
    assert_eq!(view.artist(), Some("shami momo (小原好美, 鬼頭明里)"));
    assert_eq!(view.album(), Some("町かどタンジェント / よいまちカンターレ"));
    assert_eq!(view.album_artist(), Some("shami momo (小原好美, 鬼頭明里)"));
    assert_eq!(view.track(), Some(1));
    assert_eq!(view.get(TagField::Isrc), Some("JPPC01901215"));
    assert_eq!(view.date(), Some("2019"));
    assert_eq!(view.genre(), None);

    assert_eq!(view.find_picture(PictureType::FrontCover).unwrap().data, png());
    assert_eq!(view.find_picture(PictureType::BackCover).unwrap().data, jpeg());
    assert!(view.find_picture(PictureType::Media).is_none());
}

#[test]
fn test_write_tags_and_pictures() {
    let input = fixture();
    let mut metadata = parse(&input).unwrap();
    let mut view = TagView::new(&mut metadata);

    view.remove_picture(PictureType::BackCover);
    assert!(view.find_picture(PictureType::BackCover).is_none());

    view.set(TagField::Title, Some("町かどタンジェント (TV Size)"));
    view.set(TagField::Artist, Some("小原好美/鬼頭明里"));
    view.set(TagField::Album, Some("町かどタンジェント"));
    view.set(TagField::AlbumArtist, Some("小原好美/鬼頭明里"));
    view.set_track(Some(5));
    view.set(TagField::Isrc, Some("JPPC12345678"));
    view.set(TagField::Date, Some("2000"));

    let mut cover = PictureAttachment::new(PictureType::FrontCover, gif());
    cover.description = Some("front cover".to_string());
    view.attach_picture(cover).unwrap();

    let output = dump(&metadata, &input, &DumpOptions::with_padding(7847)).unwrap();
    assert!(output.ends_with(&AUDIO));

    let reparsed = parse(&output).unwrap();
    assert_eq!(
        reparsed.vorbis_comment.as_ref().unwrap().comments,
        vec![
            Comment::new("TITLE", "町かどタンジェント (TV Size)"),
            Comment::new("ARTIST", "小原好美/鬼頭明里"),
            Comment::new("ALBUM", "町かどタンジェント"),
            Comment::new("ALBUMARTIST", "小原好美/鬼頭明里"),
            Comment::new("TRACKNUMBER", "5"),
            Comment::new("ISRC", "JPPC12345678"),
            Comment::new("DATE", "2000"),
            Comment::new("album artist", "小原好美/鬼頭明里"),
        ]
    );

    assert_eq!(reparsed.pictures.len(), 1);
    let front = &reparsed.pictures[0];
    assert_eq!(front.picture_type, PictureType::FrontCover);
    assert_eq!(front.mime_type, "image/gif");
    assert_eq!(front.description, "front cover");
    assert_eq!((front.width, front.height), (1, 1));
    assert_eq!(front.color_depth, 24);
    assert_eq!(front.used_colors, 2);
    assert_eq!(front.data, gif());
}

#[test]
fn test_remove_tags_and_pictures() {
    let input = fixture();
    let mut metadata = parse(&input).unwrap();
    let mut view = TagView::new(&mut metadata);

    view.remove_all_pictures();
    for field in [
        TagField::Title,
        TagField::Artist,
        TagField::Album,
        TagField::AlbumArtist,
        TagField::Isrc,
        TagField::Date,
    ] {
        view.set(field, None);
    }
    view.set_track(None);

    let output = dump(&metadata, &input, &DumpOptions::with_padding(8192)).unwrap();
    let reparsed = parse(&output).unwrap();
    let vorbis_comment = reparsed.vorbis_comment.unwrap();
    assert_eq!(vorbis_comment.vendor, VENDOR);
    assert!(vorbis_comment.comments.is_empty());
    assert!(reparsed.pictures.is_empty());
    assert_eq!(reparsed.stream_info, parse(&input).unwrap().stream_info);
}

#[test]
fn test_png_auto_fill_matches_sniffed_values() {
    let mut metadata = parse(&no_metadata()).unwrap();
    let mut view = TagView::new(&mut metadata);
    view.attach_picture(PictureAttachment::new(PictureType::Illustration, indexed_png()))
        .unwrap();

    let expected = sniff_image(&indexed_png()).unwrap();
    let picture = view.find_picture(PictureType::Illustration).unwrap();
    assert_eq!(picture.mime_type, expected.mime_type);
    assert_eq!(picture.width, expected.width);
    assert_eq!(picture.height, expected.height);
    assert_eq!(picture.color_depth, expected.color_depth);
    assert_eq!(picture.used_colors, expected.used_colors);

    // 2x2, 2-bit palette indices, 4 palette entries
    assert_eq!((picture.width, picture.height), (2, 2));
    assert_eq!(picture.color_depth, 6);
    assert_eq!(picture.used_colors, 4);
}

#[test]
fn test_auto_fill_on_jpeg() {
    let mut metadata = parse(&no_metadata()).unwrap();
    let mut view = TagView::new(&mut metadata);
    view.attach_picture(PictureAttachment::new(PictureType::BackCover, jpeg())).unwrap();

    let picture = view.find_picture(PictureType::BackCover).unwrap();
    assert_eq!(picture.mime_type, "image/jpeg");
    assert_eq!((picture.width, picture.height, picture.color_depth), (1, 1, 24));
}

#[test]
fn test_unrecognized_image_is_rejected() {
    let mut metadata = parse(&fixture()).unwrap();
    let before = metadata.clone();
    let result = TagView::new(&mut metadata)
        .attach_picture(PictureAttachment::new(PictureType::FrontCover, b"BM\0\0".to_vec()));
    assert_eq!(result, Err(Error::UnrecognizedImageFormat));
    assert_eq!(metadata, before);
}

#[test]
fn test_view_on_file_without_comments() {
    let original = no_metadata();
    let mut metadata = parse(&original).unwrap();
    let mut view = TagView::new(&mut metadata);
    view.set(TagField::Title, Some("new"));
    view.set_genres(Some(&["Anime", "J-Pop"][..]));

    let output = dump(&metadata, &original, &DumpOptions::default()).unwrap();
    let vorbis_comment = parse(&output).unwrap().vorbis_comment.unwrap();
    assert_eq!(vorbis_comment.vendor, "");
    assert_eq!(
        vorbis_comment.comments,
        vec![
            Comment::new("title", "new"),
            Comment::new("genre", "Anime"),
            Comment::new("genre", "J-Pop"),
        ]
    );
}
