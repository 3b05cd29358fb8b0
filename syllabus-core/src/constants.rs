/// Syllabus version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Material title emitted for lessons (or sections) without parseable materials.
pub const MATERIAL_NOT_SPECIFIED: &str = "(материал не указан)";

/// Material name shown when an item has neither homework nor a material title.
pub const MATERIAL_FALLBACK: &str = "(материал)";

/// Inline placeholder for lessons without a known URL in module listings.
pub const URL_NOT_SPECIFIED: &str = "(ссылка не указана)";

/// Kind label attached to every rendered lesson block.
pub const MATERIAL_KIND_VIDEO_LESSON: &str = "Видеоурок";

/// Ellipsis appended to truncated homework text.
pub const ELLIPSIS: &str = "…";

/// Characters stripped from the tail of captured URLs.
pub const URL_TRAILING_PUNCTUATION: &[char] = &[')', '.', ',', ';'];

/// Hard cap on the candidates a relevance selection may return.
pub const MAX_SELECTION_PICKS: usize = 3;

/// Minimum length (in chars) of a query term used for lexical scoring.
pub const MIN_TERM_CHARS: usize = 3;

/// Text embedded in place of an item whose normalized text is empty.
pub const EMPTY_EMBEDDING_TEXT: &str = "empty";
