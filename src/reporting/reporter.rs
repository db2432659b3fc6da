use crate::reporting::model::ScanResult;

#[derive(Default)]
pub struct Reporter {
    results: Vec<ScanResult>,
}

impl Reporter {
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
        }
    }

    pub fn add(&mut self, result: ScanResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[ScanResult] {
        &self.results
    }

    pub fn vulnerable(&self) -> impl Iterator<Item = &ScanResult> {
        self.results.iter().filter(|r| r.is_vulnerable())
    }

    pub fn vulnerable_count(&self) -> usize {
        self.vulnerable().count()
    }
}
