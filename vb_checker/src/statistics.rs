//! Construct counters gathered during structural validation

use serde::Serialize;

/// One counter per tracked construct. Mutated only by the validator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub comments: usize,
    pub dim_declarations: usize,
    pub module_open: usize,
    pub module_close: usize,
    pub imports: usize,
    pub sub_open: usize,
    pub sub_close: usize,
    pub try_open: usize,
    pub catch: usize,
    pub try_close: usize,
    pub while_open: usize,
    pub while_close: usize,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labelled counters in report order
    pub fn entries(&self) -> [(&'static str, usize); 12] {
        [
            ("Comments", self.comments),
            ("Dim declarations", self.dim_declarations),
            ("Module Program", self.module_open),
            ("End Module", self.module_close),
            ("Imports", self.imports),
            ("Sub Main", self.sub_open),
            ("End Sub", self.sub_close),
            ("Try", self.try_open),
            ("Catch", self.catch),
            ("End Try", self.try_close),
            ("While", self.while_open),
            ("End While", self.while_close),
        ]
    }

    /// Sum of all counters
    pub fn total(&self) -> usize {
        self.entries().iter().map(|(_, n)| n).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_cover_every_counter() {
        let stats = Statistics {
            comments: 1,
            dim_declarations: 2,
            module_open: 3,
            module_close: 4,
            imports: 5,
            sub_open: 6,
            sub_close: 7,
            try_open: 8,
            catch: 9,
            try_close: 10,
            while_open: 11,
            while_close: 12,
        };

        let values: Vec<_> = stats.entries().iter().map(|(_, n)| *n).collect();
        assert_eq!(values, (1..=12).collect::<Vec<_>>());
        assert_eq!(stats.total(), 78);
    }

    #[test]
    fn test_new_is_zeroed() {
        assert_eq!(Statistics::new().total(), 0);
    }
}
