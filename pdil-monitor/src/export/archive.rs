use std::io::{Cursor, Write};

use bytes::Bytes;
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use super::Blob;
use crate::error::ExportError;

/// Packs named files into one downloadable archive.
pub trait ArchiveBuilder: Send + Sync {
    fn create(&self, entries: &[(String, Bytes)], filename: &str) -> Result<Blob, ExportError>;
}

/// Zip archive with every entry stored under a single folder.
#[derive(Debug, Clone)]
pub struct ZipArchiveBuilder {
    pub folder: String,
}

impl ZipArchiveBuilder {
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
        }
    }
}

impl ArchiveBuilder for ZipArchiveBuilder {
    fn create(&self, entries: &[(String, Bytes)], filename: &str) -> Result<Blob, ExportError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.add_directory(format!("{}/", self.folder), options)?;
        for (name, contents) in entries {
            zip.start_file(format!("{}/{}", self.folder, name), options)?;
            zip.write_all(contents)?;
        }
        let buffer = zip.finish()?.into_inner();

        Ok(Blob {
            filename: filename.to_string(),
            content_type: "application/zip",
            bytes: Bytes::from(buffer),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use zip::ZipArchive;

    use super::*;

    #[test]
    fn test_entries_land_in_folder() {
        let entries = vec![
            ("a.jpg".to_string(), Bytes::from_static(b"first")),
            ("b.jpg".to_string(), Bytes::from_static(b"second")),
        ];
        let blob = ZipArchiveBuilder::new("PDIL_Foto")
            .create(&entries, "PDIL_Foto.zip")
            .unwrap();
        assert_eq!(blob.filename, "PDIL_Foto.zip");

        let mut archive = ZipArchive::new(Cursor::new(blob.bytes.to_vec())).unwrap();
        let mut contents = String::new();
        archive
            .by_name("PDIL_Foto/b.jpg")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "second");

        let names: Vec<String> = archive.file_names().map(str::to_string).collect();
        assert!(names.contains(&"PDIL_Foto/".to_string()));
        assert!(names.contains(&"PDIL_Foto/a.jpg".to_string()));
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn test_empty_archive_is_valid() {
        let blob = ZipArchiveBuilder::new("PDIL_Foto")
            .create(&[], "PDIL_Foto.zip")
            .unwrap();
        let archive = ZipArchive::new(Cursor::new(blob.bytes.to_vec())).unwrap();
        assert_eq!(archive.len(), 1);
    }
}
