use crate::{
    melting_temperature::PrimerStats,
    primer::{Primer, Strand},
};
use anyhow::Result;
use bio::io::fasta;
use serde::{Deserialize, Serialize};
use std::fs::File;

/// A named, ordered collection of primers, persisted as JSON. FASTA import
/// and CSV export cover the exchange formats; the CSV carries the same
/// `gc%` / `tm` values the estimator computes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PrimerLibrary {
    primers: Vec<Primer>,
}

impl PrimerLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primers(&self) -> &[Primer] {
        &self.primers
    }

    pub fn is_empty(&self) -> bool {
        self.primers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.primers.len()
    }

    /// Adds a primer; one that sanitized down to nothing is refused.
    pub fn add(&mut self, primer: Primer) -> bool {
        if primer.is_empty() {
            return false;
        }
        self.primers.push(primer);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Primer> {
        self.primers.iter().find(|p| p.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Primer> {
        let index = self.primers.iter().position(|p| p.name == name)?;
        Some(self.primers.remove(index))
    }

    pub fn load_from_path(path: &str) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    pub fn save_to_path(&self, path: &str) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Reads every record of a FASTA file as a forward primer; returns how
    /// many survived sanitization.
    pub fn import_fasta(&mut self, filename: &str) -> Result<usize> {
        let file = File::open(filename)?;
        let mut added = 0;
        for record in fasta::Reader::new(file).records() {
            let record = record?;
            let sequence = String::from_utf8_lossy(record.seq()).to_string();
            if self.add(Primer::new(record.id(), &sequence, Strand::Direct)) {
                added += 1;
            }
        }
        Ok(added)
    }

    pub fn export_fasta(&self, filename: &str) -> Result<()> {
        let file = File::create(filename)?;
        let mut writer = fasta::Writer::new(file);
        for primer in &self.primers {
            writer.write(&primer.name, None, primer.sequence())?;
        }
        Ok(())
    }

    /// Writes `name, sequence, gc%, tm`. Degenerate primers have no single
    /// concrete reading outside a target context, so both values are N/A.
    pub fn export_csv(&self, filename: &str) -> Result<()> {
        let mut writer = csv::Writer::from_path(filename)?;
        writer.write_record(["name", "sequence", "gc%", "tm"])?;
        for primer in &self.primers {
            let (gc, tm) = match primer.is_degenerate() {
                true => ("N/A".to_string(), "N/A".to_string()),
                false => {
                    let stats = PrimerStats::of_concrete(primer.sequence());
                    (
                        format_number(stats.gc_percent),
                        format_number(stats.melting_temperature),
                    )
                }
            };
            writer.write_record([&primer.name, &primer.to_string(), &gc, &tm])?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn library_with(primers: &[(&str, &str)]) -> PrimerLibrary {
        let mut library = PrimerLibrary::new();
        for (name, sequence) in primers {
            library.add(Primer::new(name, sequence, Strand::Direct));
        }
        library
    }

    #[test]
    fn test_add_refuses_empty() {
        let mut library = PrimerLibrary::new();
        assert!(!library.add(Primer::direct("Q%1")));
        assert!(library.add(Primer::direct("ACGT")));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_get_and_remove() {
        let mut library = library_with(&[("p1", "AAAA"), ("p2", "ACGT")]);
        assert_eq!(library.get("p2").unwrap().sequence(), b"ACGT");
        assert!(library.remove("p1").is_some());
        assert!(library.get("p1").is_none());
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_json_round_trip() {
        let library = library_with(&[("p1", "AAAA"), ("p2", "TTCGGTS")]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        let path = path.to_str().unwrap();

        library.save_to_path(path).unwrap();
        let loaded = PrimerLibrary::load_from_path(path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("p2").unwrap().sequence(), b"TTCGGTS");
    }

    #[test]
    fn test_fasta_import_sanitizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("primers.fa");
        let mut file = File::create(&path).unwrap();
        write!(file, ">p1\nac gt\n>p2\n---\n>p3\nTTCGGTS\n").unwrap();
        drop(file);

        let mut library = PrimerLibrary::new();
        let added = library.import_fasta(path.to_str().unwrap()).unwrap();
        assert_eq!(added, 2);
        assert_eq!(library.get("p1").unwrap().sequence(), b"ACGT");
        assert!(library.get("p2").is_none());
    }

    #[test]
    fn test_csv_export_values() {
        let library = library_with(&[("plain", "AAAA"), ("wobble", "TTCGGTS")]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.csv");
        library.export_csv(path.to_str().unwrap()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("plain,AAAA,0,8"));
        assert!(text.contains("wobble,TTCGGTS,N/A,N/A"));
    }

    #[test]
    fn test_fasta_round_trip() {
        let library = library_with(&[("p1", "ACGT")]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("primers.fa");
        library.export_fasta(path.to_str().unwrap()).unwrap();

        let mut reloaded = PrimerLibrary::new();
        reloaded.import_fasta(path.to_str().unwrap()).unwrap();
        assert_eq!(reloaded.get("p1").unwrap().sequence(), b"ACGT");
    }
}
