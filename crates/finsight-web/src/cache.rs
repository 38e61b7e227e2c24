//! Bounded cache of derived statements keyed by upload digest.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use finsight_statement::{DerivedStatement, LiquidityRatios};
use sha2::{Digest, Sha256};

/// One processed upload.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub file_name: String,
    pub derived: DerivedStatement,
    pub ratios: LiquidityRatios,
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Cache key of an upload. The extension takes part because it selects the parser.
pub fn upload_key(file_name: &str, bytes: &[u8]) -> String {
    let ext = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let mut hasher = Sha256::new();
    hasher.update(ext.as_bytes());
    hasher.update([0u8]);
    hasher.update(bytes);
    hex(&hasher.finalize())
}

/// Evicts the oldest insertion once `capacity` is reached.
pub struct StatementCache {
    capacity: usize,
    entries: HashMap<String, Arc<Analysis>>,
    order: VecDeque<String>,
}

impl StatementCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<Analysis>> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: String, analysis: Analysis) -> Arc<Analysis> {
        let value = Arc::new(analysis);
        if self.entries.insert(key.clone(), value.clone()).is_none() {
            self.order.push_back(key);
            while self.order.len() > self.capacity {
                if let Some(old) = self.order.pop_front() {
                    self.entries.remove(&old);
                }
            }
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(name: &str) -> Analysis {
        Analysis {
            file_name: name.to_string(),
            derived: DerivedStatement { items: vec![], total_prior: 1.0, total_current: 1.0 },
            ratios: LiquidityRatios::UNAVAILABLE,
        }
    }

    #[test]
    fn test_upload_key_is_sha256_hex() {
        // sha256("csv\0abc")
        let expected = hex(&Sha256::digest(b"csv\0abc"));
        let key = upload_key("bs.csv", b"abc");
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(key, expected);
    }

    #[test]
    fn test_upload_key_depends_on_extension_only() {
        assert_eq!(upload_key("a.XLSX", b"data"), upload_key("b.xlsx", b"data"));
        assert_ne!(upload_key("a.xlsx", b"data"), upload_key("a.csv", b"data"));
        assert_ne!(upload_key("a.csv", b"data"), upload_key("a.csv", b"other"));
    }

    #[test]
    fn test_oldest_entry_evicted() {
        let mut c = StatementCache::new(2);
        c.insert("a".into(), analysis("a.xlsx"));
        c.insert("b".into(), analysis("b.xlsx"));
        c.insert("c".into(), analysis("c.xlsx"));
        assert!(c.get("a").is_none());
        assert!(c.get("b").is_some());
        assert_eq!(c.get("c").unwrap().file_name, "c.xlsx");
    }

    #[test]
    fn test_reinsert_does_not_duplicate_order() {
        let mut c = StatementCache::new(2);
        c.insert("a".into(), analysis("a1"));
        c.insert("a".into(), analysis("a2"));
        c.insert("b".into(), analysis("b"));
        assert_eq!(c.get("a").unwrap().file_name, "a2");
        assert!(c.get("b").is_some());
    }
}
