use std::collections::HashMap;

/// Dense integer codes for categorical labels, assigned in first-seen order starting at 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMap {
    labels: Vec<String>,
    codes: HashMap<String, u32>,
}

impl ClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the code for `label`, assigning the next free code if it is new.
    pub fn code_for(&mut self, label: &str) -> u32 {
        if let Some(&code) = self.codes.get(label) {
            return code;
        }
        self.labels.push(label.to_string());
        let code = self.labels.len() as u32;
        self.codes.insert(label.to_string(), code);
        code
    }

    pub fn get(&self, label: &str) -> Option<u32> {
        self.codes.get(label).copied()
    }

    /// The label assigned to `code`, if any.
    pub fn label(&self, code: u32) -> Option<&str> {
        let idx = usize::try_from(code).ok()?.checked_sub(1)?;
        self.labels.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `(label, code)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), i as u32 + 1))
    }
}
