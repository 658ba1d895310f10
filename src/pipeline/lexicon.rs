//! Fixed word tables used by the extraction heuristics.
//!
//! All tables are read-only and shared by every pipeline run.

/// Words that never name a class or an attribute.
///
/// Covers function words, requirement jargon and document-structure words.
pub const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "to", "of", "in", "on", "for", "with", "by",
    "is", "are", "be", "as", "at", "from", "this", "that", "these", "those",
    "system", "shall", "must", "should", "can", "may", "will", "req", "fr",
    "nfr", "us", "info", "def", "con",
    "project", "document", "scope", "stakeholders", "each", "person",
    "one", "more", "exactly", "zero", "all",
    "within", "between", "greater", "less", "than", "equal", "not",
    "i", "we", "you", "they", "it", "he", "she",
    "commerce", "management", "specification", "version",
    "introduction", "purpose", "functional", "non-functional",
    "registered", "temporary", "financial", "item", "purchase",
];

/// Words that usually name a property rather than an entity.
pub const ATTRIBUTE_KEYWORDS: &[&str] = &[
    "id", "name", "email", "password", "address", "phone", "date", "time",
    "amount", "price", "quantity", "status", "description", "type", "code",
    "number", "value", "flag", "url", "path", "key", "token", "timestamp",
    "created", "updated", "modified", "deleted", "active", "enabled",
    "firstname", "lastname", "username", "fullname", "displayname",
    "street", "city", "state", "country", "zipcode", "postalcode",
    "total", "subtotal", "discount", "tax", "shipping", "rating", "comment",
    "proof", "stock", "unit", "transaction",
];

/// Suffixes that mark a token as an attribute name.
pub const ATTRIBUTE_SUFFIXES: &[&str] = &[
    "id", "name", "date", "time", "amount", "price", "count", "number", "code", "status",
    "type", "quantity",
];

/// Near-domain nouns that are never promoted to classes.
pub const NON_CLASS_NOUNS: &[&str] = &["email", "price", "quantity", "rating", "proof", "zero", "stock"];

/// Generic nouns and verbs that are never attribute names.
pub const NON_ATTRIBUTE_WORDS: &[&str] = &[
    "user", "person", "item", "thing", "object", "has", "includes", "contains", "with",
];

/// Verbs that link two classes in the bounded-window relation search, in match priority order.
pub const RELATION_VERBS: &[&str] = &[
    "place", "places", "contain", "contains", "reference", "references",
    "include", "includes", "have", "has", "create", "creates",
    "write", "writes", "add", "adds", "save", "saves",
    "deliver", "delivers", "delivered", "send", "sends",
];

/// Whether `word` (already lowercased) is a stopword.
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}
