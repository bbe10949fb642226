use crate::error::ExtractionError;
use crate::logger;
use lopdf::Document;
use regex::Regex;
use std::path::Path;

lazy_static::lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("static regex");
}

const PAGE_SEPARATOR: &str = "\n\n";

/// Extract the text of every page in page order. Fragments within a page are
/// joined by single spaces, pages by a blank line. Any failing page fails the
/// whole extraction.
///
/// Encrypted files are opened with the empty user password, which covers
/// documents restricted only by an owner password.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut doc = Document::load_mem(bytes)?;

    if doc.is_encrypted() {
        doc.decrypt("").map_err(|e| {
            logger::log(&format!("PDF needs a user password: {}", e));
            ExtractionError::Encrypted
        })?;
        logger::log("Decrypted PDF with the empty user password");
    }

    // BTreeMap keyed by 1-based page number, so iteration is in page order.
    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(ExtractionError::NoPages);
    }

    let mut page_texts = Vec::with_capacity(pages.len());
    for &page in pages.keys() {
        let raw = doc
            .extract_text(&[page])
            .map_err(|e| ExtractionError::Page {
                page,
                message: e.to_string(),
            })?;
        page_texts.push(normalize_page(&raw));
    }

    logger::log(&format!("Extracted text from {} PDF pages", page_texts.len()));
    Ok(join_pages(page_texts))
}

/// Reads the file and runs the extraction on the blocking pool.
pub async fn extract_text_from_path(path: &Path) -> Result<String, ExtractionError> {
    let bytes = tokio::fs::read(path).await?;
    logger::log(&format!(
        "Read {} bytes from {}",
        bytes.len(),
        path.display()
    ));

    tokio::task::spawn_blocking(move || extract_text(&bytes))
        .await
        .map_err(|e| ExtractionError::Worker(e.to_string()))?
}

fn normalize_page(raw: &str) -> String {
    WHITESPACE.replace_all(raw.trim(), " ").into_owned()
}

fn join_pages<I>(pages: I) -> String
where
    I: IntoIterator<Item = String>,
{
    pages.into_iter().collect::<Vec<_>>().join(PAGE_SEPARATOR)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::{dictionary, encryption, Object, Stream, StringFormat};
    use std::io::Write;

    /// Standard password padding string (PDF 1.7, 7.6.3.3).
    const PAD_BYTES: [u8; 32] = [
        0x28, 0xBF, 0x4E, 0x5E, 0x4E, 0x75, 0x8A, 0x41, 0x64, 0x00, 0x4E, 0x56, 0xFF, 0xFA, 0x01,
        0x08, 0x2E, 0x2E, 0x00, 0xB6, 0xD0, 0x68, 0x3E, 0x80, 0x2F, 0x0C, 0xA9, 0xFE, 0x64, 0x53,
        0x69, 0x7A,
    ];

    /// Builds a minimal PDF with one Helvetica text line per page.
    pub(crate) fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut bytes = Vec::new();
        build_document(pages).save_to(&mut bytes).unwrap();
        bytes
    }

    /// Same document, encrypted with 40-bit RC4 (revision 2) under
    /// `user_password`. An empty password gives an owner-only restricted file.
    pub(crate) fn build_encrypted_pdf(pages: &[&str], user_password: &str) -> Vec<u8> {
        let mut doc = build_document(pages);

        let file_id = Object::String(b"context-quiz-pdf".to_vec(), StringFormat::Hexadecimal);
        doc.trailer.set("ID", vec![file_id.clone(), file_id]);
        let encrypt_id = doc.add_object(dictionary! {
            "Filter" => "Standard",
            "V" => 1_i64,
            "R" => 2_i64,
            "Length" => 40_i64,
            // Only hashed into the key here.
            "O" => Object::String(vec![0x42; 32], StringFormat::Hexadecimal),
            "P" => -4_i64,
        });
        doc.trailer.set("Encrypt", encrypt_id);

        let key = encryption::get_encryption_key(&doc, user_password, false).unwrap();
        doc.get_object_mut(encrypt_id)
            .and_then(Object::as_dict_mut)
            .unwrap()
            .set(
                "U",
                Object::String(rc4(&key, &PAD_BYTES), StringFormat::Hexadecimal),
            );

        // RC4 is symmetric, so the per-object decryption encrypts as well.
        for (&id, object) in doc.objects.iter_mut() {
            if id == encrypt_id || !matches!(object, Object::Stream(_)) {
                continue;
            }
            let cipher = encryption::decrypt_object(&key, id, object).unwrap();
            if let Object::Stream(stream) = object {
                stream.set_content(cipher);
            }
        }

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    fn rc4(key: &[u8], data: &[u8]) -> Vec<u8> {
        let mut state: Vec<u8> = (0..=255).collect();
        let mut j: u8 = 0;
        for i in 0..256 {
            j = j.wrapping_add(state[i]).wrapping_add(key[i % key.len()]);
            state.swap(i, j as usize);
        }

        let (mut i, mut j) = (0u8, 0u8);
        data.iter()
            .map(|&byte| {
                i = i.wrapping_add(1);
                j = j.wrapping_add(state[i as usize]);
                state.swap(i as usize, j as usize);
                byte ^ state[state[i as usize].wrapping_add(state[j as usize]) as usize]
            })
            .collect()
    }

    fn build_document(pages: &[&str]) -> Document {
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! {
                        "F1" => font_id,
                    },
                },
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    #[test]
    fn test_rc4_known_vectors() {
        assert_eq!(
            rc4(b"Key", b"Plaintext"),
            [0xBB, 0xF3, 0x16, 0xE8, 0xD9, 0x40, 0xAF, 0x0A, 0xD3]
        );
        assert_eq!(rc4(b"Wiki", b"pedia"), [0x10, 0x21, 0xBF, 0x04, 0x20]);
    }

    #[test]
    fn test_document_without_pages() {
        let result = extract_text(&build_pdf(&[]));
        assert!(matches!(result, Err(ExtractionError::NoPages)));
    }

    #[test]
    fn test_owner_only_encryption_is_opened() {
        let bytes = build_encrypted_pdf(&["Glycolysis", "Krebs cycle"], "");
        assert!(Document::load_mem(&bytes).unwrap().is_encrypted());

        let text = extract_text(&bytes).unwrap();
        assert!(text.contains("Glycolysis"));
        assert!(text.contains("Krebs cycle"));
    }

    #[test]
    fn test_user_password_is_encrypted_error() {
        let bytes = build_encrypted_pdf(&["Glycolysis"], "hunter2");
        let result = extract_text(&bytes);
        assert!(matches!(result, Err(ExtractionError::Encrypted)));
    }

    #[test]
    fn test_garbage_bytes_fail() {
        let result = extract_text(b"definitely not a pdf");
        assert!(matches!(result, Err(ExtractionError::Parse(_))));
    }

    #[test]
    fn test_empty_bytes_fail() {
        assert!(extract_text(&[]).is_err());
    }

    #[test]
    fn test_pages_extracted_in_order() {
        let bytes = build_pdf(&["Mitochondria", "Ribosomes"]);
        let text = extract_text(&bytes).unwrap();

        let first = text.find("Mitochondria").unwrap();
        let second = text.find("Ribosomes").unwrap();
        assert!(first < second);
        assert!(text.contains(PAGE_SEPARATOR));
    }

    #[test]
    fn test_normalize_page_collapses_whitespace() {
        assert_eq!(
            normalize_page("  The cell\n is\t\tthe  unit \n"),
            "The cell is the unit"
        );
    }

    #[test]
    fn test_join_pages_uses_paragraph_break() {
        let joined = join_pages(vec!["one".to_string(), "two".to_string()]);
        assert_eq!(joined, "one\n\ntwo");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = extract_text_from_path(Path::new("/nonexistent/quiz/input.pdf")).await;
        assert!(matches!(result, Err(ExtractionError::Io(_))));
    }

    #[tokio::test]
    async fn test_extract_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&build_pdf(&["Osmosis"])).unwrap();

        let text = extract_text_from_path(file.path()).await.unwrap();
        assert!(text.contains("Osmosis"));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.5\nbroken").unwrap();

        let result = extract_text_from_path(file.path()).await;
        assert!(result.is_err());
        assert!(!matches!(result, Err(ExtractionError::Io(_))));
    }
}
