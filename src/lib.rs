pub mod dna_sequence;
pub mod iupac_code;
pub mod melting_temperature;
pub mod pcr;
pub mod primer;
pub mod primer_library;
pub mod primer_match;

pub use dna_sequence::DNAsequence;
pub use iupac_code::IupacCode;
pub use melting_temperature::PrimerStats;
pub use pcr::{Amplicon, InSilicoPcrSettings};
pub use primer::{Primer, Strand};
pub use primer_library::PrimerLibrary;
