// CLI command implementations
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde_json::{json, Value};

use flacmeta::flac::{BlockScanner, FLAC_SIGNATURE};
use flacmeta::{
    dump, parse, DumpOptions, Metadata, PictureAttachment, PictureType, TagField, TagView,
};

use super::output::{OutputFormatter, ProgressBar};

/// Read a FLAC file and parse its metadata
fn load(path: &Path) -> Result<(Vec<u8>, Metadata)> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let metadata =
        parse(&data).with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok((data, metadata))
}

/// Re-serialize `metadata` over the audio of `original` and write it to `path`
fn save(path: &Path, metadata: &Metadata, original: &[u8], padding: u32) -> Result<()> {
    let output = dump(metadata, original, &DumpOptions::with_padding(padding))
        .with_context(|| format!("Failed to serialize metadata for {}", path.display()))?;
    fs::write(path, output).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), padding, "rewrote metadata");
    Ok(())
}

fn metadata_value(metadata: &Metadata, with_data: bool) -> Result<Value> {
    let mut value = serde_json::to_value(metadata)?;
    if !with_data {
        if let Some(pictures) = value.get_mut("pictures").and_then(Value::as_array_mut) {
            for picture in pictures.iter_mut().filter_map(Value::as_object_mut) {
                picture.remove("data");
            }
        }
    }
    Ok(value)
}

/// Read metadata from files
pub fn command_read(
    files: &[PathBuf],
    with_data: bool,
    output: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout()),
    };

    let mut failures = 0;
    for path in files {
        match load(path) {
            Ok((_, metadata)) => {
                let value = json!({
                    "file": path.display().to_string(),
                    "metadata": metadata_value(&metadata, with_data)?,
                });
                formatter.output_value(&value, &mut *writer)?;
            }
            Err(e) => {
                formatter.print_error(&format!("{:#}", e));
                failures += 1;
            }
        }
    }
    writer.flush()?;

    if failures > 0 {
        bail!("{} of {} files could not be read", failures, files.len());
    }
    Ok(())
}

/// Show file, stream and block information
pub fn command_info(files: &[PathBuf], formatter: &OutputFormatter) -> Result<()> {
    let mut stdout = std::io::stdout();
    for path in files {
        let (data, metadata) = load(path)?;
        let file_metadata = fs::metadata(path)
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        let modified = file_metadata
            .modified()
            .ok()
            .map(|time| chrono::DateTime::<chrono::Local>::from(time).to_rfc3339());

        let mut blocks = Vec::new();
        for block in BlockScanner::new(&data, FLAC_SIGNATURE.len()) {
            let block = block.with_context(|| format!("Failed to scan {}", path.display()))?;
            blocks.push(json!({
                "type": format!("{:?}", block.header.block_type),
                "offset": block.offset,
                "length": block.header.length,
            }));
        }

        let stream = &metadata.stream_info;
        let value = json!({
            "file": path.display().to_string(),
            "size": file_metadata.len(),
            "modified": modified,
            "sample_rate": stream.sample_rate,
            "channels": stream.channels,
            "bits_per_sample": stream.bits_per_sample,
            "total_samples": stream.total_samples,
            "duration_secs": stream.duration_secs(),
            "md5": stream.signature,
            "vendor": metadata.vorbis_comment.as_ref().map(|v| v.vendor.clone()),
            "pictures": metadata.pictures.len(),
            "blocks": blocks,
        });
        formatter.output_value(&value, &mut stdout)?;
    }
    Ok(())
}

/// Apply a JSON object of `tag name -> string | number | null` through the tag view.
/// GENRE also accepts an array of strings.
fn apply_tags(metadata: &mut Metadata, tags: &Value) -> Result<usize> {
    let object = tags
        .as_object()
        .ok_or_else(|| anyhow!("Tags must be a JSON object"))?;

    let mut view = TagView::new(metadata);
    for (name, value) in object {
        let field =
            TagField::from_name(name).ok_or_else(|| anyhow!("Unknown tag field: {}", name))?;
        match value {
            Value::Null => view.set(field, None),
            Value::String(s) => view.set(field, Some(s.as_str())),
            Value::Number(n) => view.set(field, Some(&n.to_string())),
            Value::Array(items) if field == TagField::Genre => {
                let genres = items
                    .iter()
                    .map(|item| {
                        item.as_str()
                            .ok_or_else(|| anyhow!("Genre values must be strings"))
                    })
                    .collect::<Result<Vec<&str>>>()?;
                view.set_genres(None);
                view.set_genres(Some(genres.as_slice()));
            }
            other => bail!("Unsupported value for {}: {}", name, other),
        }
    }
    Ok(object.len())
}

/// Write tags to a file
pub fn command_write(
    file: &Path,
    tags_json: Option<&str>,
    from_file: Option<&Path>,
    padding: u32,
    formatter: &OutputFormatter,
) -> Result<()> {
    let tags_json = match (tags_json, from_file) {
        (_, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (Some(json), None) => json.to_string(),
        (None, None) => bail!("No tags given"),
    };
    let tags: Value = serde_json::from_str(&tags_json).context("Invalid JSON")?;

    let (data, mut metadata) = load(file)?;
    let count = apply_tags(&mut metadata, &tags)?;
    save(file, &metadata, &data, padding)?;

    formatter.print_success(&format!("Updated {} tags in {}", count, file.display()));
    Ok(())
}

/// Parse every file matching `pattern` under `directory`
pub fn command_batch(directory: &Path, pattern: &str, formatter: &OutputFormatter) -> Result<()> {
    let glob_pattern = if pattern.contains('*') || pattern.contains('?') {
        directory.join(pattern)
    } else {
        directory.join("**").join(pattern)
    };
    let glob_pattern = glob_pattern.to_string_lossy();

    let mut files = Vec::new();
    for entry in glob::glob(&glob_pattern).context("Invalid glob pattern")? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => formatter.print_error(&format!("Error reading path: {}", e)),
        }
    }

    if files.is_empty() {
        formatter.print_info("No files found matching pattern");
        return Ok(());
    }
    formatter.print_info(&format!("Processing {} files...", files.len()));

    let mut progress = ProgressBar::new(files.len(), !formatter.quiet);
    let mut errors = Vec::new();
    for path in &files {
        if let Err(e) = load(path) {
            errors.push(format!("{:#}", e));
        }
        progress.increment(&path.display().to_string());
    }

    for error in &errors {
        formatter.print_error(error);
    }
    formatter.print_info(&format!(
        "Completed: {} successful, {} errors",
        files.len() - errors.len(),
        errors.len()
    ));
    Ok(())
}

/// Export embedded pictures into `output_dir`
pub fn command_export_cover(
    file: &Path,
    output_dir: &Path,
    index: Option<usize>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let (_, metadata) = load(file)?;
    if metadata.pictures.is_empty() {
        bail!("{} has no embedded pictures", file.display());
    }

    let selected: Vec<_> = match index {
        Some(i) => {
            let picture = metadata.pictures.get(i).ok_or_else(|| {
                anyhow!("Picture index {} out of range ({} pictures)", i, metadata.pictures.len())
            })?;
            vec![(i, picture)]
        }
        None => metadata.pictures.iter().enumerate().collect(),
    };

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cover".to_string());

    for (i, picture) in selected {
        let target = output_dir.join(format!("{}_{}.{}", stem, i, picture.extension()));
        fs::write(&target, &picture.data)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        formatter.print_success(&format!(
            "{} ({}, {}x{}) -> {}",
            picture.picture_type.label(),
            picture.mime_type,
            picture.width,
            picture.height,
            target.display()
        ));
    }
    Ok(())
}

/// Attach a picture from an image file
pub fn command_set_cover(
    file: &Path,
    image: &Path,
    picture_type: u8,
    mime_type: Option<String>,
    description: Option<String>,
    padding: u32,
    formatter: &OutputFormatter,
) -> Result<()> {
    let image_data =
        fs::read(image).with_context(|| format!("Failed to read {}", image.display()))?;
    let (data, mut metadata) = load(file)?;

    let picture_type = PictureType::from_u8(picture_type);
    let mut attachment = PictureAttachment::new(picture_type, image_data);
    attachment.mime_type = mime_type;
    attachment.description = description;
    TagView::new(&mut metadata)
        .attach_picture(attachment)
        .with_context(|| format!("Failed to attach {}", image.display()))?;

    save(file, &metadata, &data, padding)?;
    formatter.print_success(&format!(
        "Set {} picture on {}",
        picture_type.label(),
        file.display()
    ));
    Ok(())
}

/// Remove every picture from each file
pub fn command_remove_cover(
    files: &[PathBuf],
    padding: u32,
    formatter: &OutputFormatter,
) -> Result<()> {
    for file in files {
        let (data, mut metadata) = load(file)?;
        let removed = metadata.pictures.len();
        TagView::new(&mut metadata).remove_all_pictures();
        save(file, &metadata, &data, padding)?;
        formatter.print_success(&format!("Removed {} pictures from {}", removed, file.display()));
    }
    Ok(())
}
