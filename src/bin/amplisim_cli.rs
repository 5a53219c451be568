use amplisim::{
    melting_temperature, DNAsequence, InSilicoPcrSettings, IupacCode, Primer, PrimerLibrary,
    PrimerStats,
};
use serde::Serialize;
use std::env;

#[derive(Serialize)]
struct ProductSummary {
    region: String,
    start: usize,
    end: usize,
    length: usize,
    forward_mismatches: usize,
    reverse_mismatches: usize,
}

#[derive(Serialize)]
struct PrimerInfo {
    sequence: String,
    degenerate: bool,
    non_acgtn: bool,
    gc_percent: Option<f64>,
    melting_temperature: Option<f64>,
}

fn usage() {
    eprintln!(
        "Usage:\n  \
  amplisim_cli --version\n  \
  amplisim_cli find TARGET.fa|TARGET.gb FORWARD REVERSE\n    \
    [--mismatches FWD REV] [--perfect-match N] [--max-product-size N] [--circular]\n  \
  amplisim_cli revcomp SEQUENCE\n  \
  amplisim_cli primer-info SEQUENCE [TARGET.fa|TARGET.gb]\n  \
  amplisim_cli library-import LIBRARY.json PRIMERS.fa\n  \
  amplisim_cli library-export-csv LIBRARY.json OUTPUT.csv"
    );
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Could not serialize JSON output: {e}"))?;
    println!("{text}");
    Ok(())
}

fn load_target(path: &str) -> Result<DNAsequence, String> {
    let sequences = if path.ends_with(".gb") || path.ends_with(".gbk") || path.ends_with(".genbank")
    {
        DNAsequence::from_genbank_file(path)
    } else {
        DNAsequence::from_fasta_file(path)
    };
    sequences
        .map_err(|e| format!("Could not read target '{path}': {e}"))?
        .into_iter()
        .next()
        .ok_or_else(|| format!("No sequence found in '{path}'"))
}

fn parse_usize(value: &str, what: &str) -> Result<usize, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid {what}: '{value}'"))
}

fn run_find(args: &[String]) -> Result<(), String> {
    if args.len() < 3 {
        usage();
        return Err("find requires a target file and two primers".to_string());
    }
    let mut target = load_target(&args[0])?;
    let forward = Primer::direct(&args[1]);
    let reverse = Primer::complementary(&args[2]);
    if forward.is_empty() || reverse.is_empty() {
        return Err("Both primers must contain valid DNA codes".to_string());
    }

    let mut settings = InSilicoPcrSettings::new(forward, reverse);
    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--mismatches" => {
                if i + 2 >= args.len() {
                    return Err("--mismatches requires two values".to_string());
                }
                settings.forward_mismatches = parse_usize(&args[i + 1], "forward mismatches")?;
                settings.reverse_mismatches = parse_usize(&args[i + 2], "reverse mismatches")?;
                i += 3;
            }
            "--perfect-match" => {
                if i + 1 >= args.len() {
                    return Err("--perfect-match requires a value".to_string());
                }
                settings.perfect_match_len = parse_usize(&args[i + 1], "perfect-match length")?;
                i += 2;
            }
            "--max-product-size" => {
                if i + 1 >= args.len() {
                    return Err("--max-product-size requires a value".to_string());
                }
                settings.max_product_size = parse_usize(&args[i + 1], "max product size")?;
                i += 2;
            }
            "--circular" => {
                target.set_circular(true);
                i += 1;
            }
            other => return Err(format!("Unknown find option: '{other}'")),
        }
    }

    let products: Vec<ProductSummary> = settings
        .find_products(&target)
        .iter()
        .map(|amplicon| ProductSummary {
            region: amplicon.region_string(),
            start: amplicon.start + 1,
            end: amplicon.end + 1,
            length: amplicon.length,
            forward_mismatches: amplicon.forward_mismatches,
            reverse_mismatches: amplicon.reverse_mismatches,
        })
        .collect();
    print_json(&products)
}

fn run_primer_info(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        usage();
        return Err("primer-info requires a primer sequence".to_string());
    }
    let primer = Primer::direct(&args[0]);
    let stats = match args.get(1) {
        Some(path) => melting_temperature::estimate(&primer, &load_target(path)?),
        // Without a context only a concrete primer has defined values
        None => (!primer.is_empty() && !primer.is_degenerate())
            .then(|| PrimerStats::of_concrete(primer.sequence())),
    };
    print_json(&PrimerInfo {
        sequence: primer.to_string(),
        degenerate: primer.is_degenerate(),
        non_acgtn: primer.has_non_acgtn(),
        gc_percent: stats.map(|s| s.gc_percent),
        melting_temperature: stats.map(|s| s.melting_temperature),
    })
}

fn run_library_import(args: &[String]) -> Result<(), String> {
    if args.len() < 2 {
        usage();
        return Err("library-import requires a library path and a FASTA file".to_string());
    }
    let mut library = if std::path::Path::new(&args[0]).exists() {
        PrimerLibrary::load_from_path(&args[0]).map_err(|e| e.to_string())?
    } else {
        PrimerLibrary::new()
    };
    let added = library.import_fasta(&args[1]).map_err(|e| e.to_string())?;
    library.save_to_path(&args[0]).map_err(|e| e.to_string())?;
    println!("Imported {added} primers into {}", args[0]);
    Ok(())
}

fn run_library_export_csv(args: &[String]) -> Result<(), String> {
    if args.len() < 2 {
        usage();
        return Err("library-export-csv requires a library path and an output path".to_string());
    }
    let library = PrimerLibrary::load_from_path(&args[0]).map_err(|e| e.to_string())?;
    library.export_csv(&args[1]).map_err(|e| e.to_string())?;
    println!("Exported {} primers to {}", library.len(), args[1]);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    if args.len() <= 1 {
        usage();
        return Err("Missing command".to_string());
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("amplisim {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    match args[1].as_str() {
        "find" => run_find(&args[2..]),
        "revcomp" => {
            if args.len() < 3 {
                usage();
                return Err("revcomp requires a sequence".to_string());
            }
            let clean = IupacCode::sanitize(args[2].as_bytes());
            println!("{}", String::from_utf8_lossy(&IupacCode::reverse_complement(&clean)));
            Ok(())
        }
        "primer-info" => run_primer_info(&args[2..]),
        "library-import" => run_library_import(&args[2..]),
        "library-export-csv" => run_library_export_csv(&args[2..]),
        other => {
            usage();
            Err(format!("Unknown command: '{other}'"))
        }
    }
}
