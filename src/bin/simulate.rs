//! CLI driver: parses flags, builds a predictor, runs a trace file through
//! it, and prints a final report. Argument parsing is hand-rolled, in the
//! same style as the rest of this crate's evaluation binaries: no `clap`,
//! just `std::env::args()` and a `usage` bailout.

use std::path::PathBuf;
use std::process::exit;

use dendrite::config::{ConfigError, Method, SimConfig};
use dendrite::predictor::{BranchPredictor, PredictorKind};
use dendrite::trace::TraceReader;

fn usage(program: &str) -> ! {
    println!("usage: {program} -method <name> -trace <path> [-cbits N] [-cinit N] [-phtsize N] [-seed N]");
    println!("  methods: one-level, two-level-global, gshare, two-level-local, tournament, tage");
    exit(1);
}

fn parse_args(args: &[String]) -> Result<SimConfig, ConfigError> {
    let mut method: Option<Method> = None;
    let mut trace_path: Option<PathBuf> = None;
    let mut cbits: u32 = 2;
    let mut cinit: i64 = 0;
    let mut phtsize: usize = 4096;
    let mut seed: Option<u64> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-method" => {
                i += 1;
                method = Some(Method::parse(&args[i])?);
            }
            "-trace" => {
                i += 1;
                trace_path = Some(PathBuf::from(&args[i]));
            }
            "-cbits" => {
                i += 1;
                cbits = args[i].parse().unwrap_or(cbits);
            }
            "-cinit" => {
                i += 1;
                cinit = args[i].parse().unwrap_or(cinit);
            }
            "-phtsize" => {
                i += 1;
                phtsize = args[i].parse().unwrap_or(phtsize);
            }
            "-seed" => {
                i += 1;
                seed = args[i].parse().ok();
            }
            other => {
                println!("unrecognized flag: {other}");
                exit(1);
            }
        }
        i += 1;
    }

    let method = method.ok_or_else(|| ConfigError::UnknownMethod("(none given)".to_string()))?;
    let trace_path = trace_path.unwrap_or_else(|| {
        println!("missing required -trace <path>");
        exit(1);
    });

    SimConfig::validate(method, cbits, cinit, phtsize, trace_path, seed)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage(&args[0]);
    }

    let cfg = match parse_args(&args[1..]) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("configuration error: {e}");
            exit(1);
        }
    };

    let mut predictor = PredictorKind::build(cfg.method, cfg.pht_size, cfg.counter_bits, cfg.counter_init, cfg.seed);

    let reader = match TraceReader::open(&cfg.trace_path) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("trace error: {e}");
            exit(1);
        }
    };

    let mut count: u64 = 0;
    for event in reader {
        let event = match event {
            Ok(event) => event,
            Err(e) => {
                eprintln!("trace error: {e}");
                exit(1);
            }
        };
        predictor.predict_and_update(event.pc, event.outcome);
        count += 1;
        if count % 10000 == 0 {
            print!("\r[*] {count} events processed");
            use std::io::Write;
            std::io::stdout().flush().ok();
        }
    }
    println!();

    let stats = predictor.stats();
    println!("[*] method:        {}", predictor.name());
    println!("[*] counter bits:  {}", cfg.counter_bits);
    println!("[*] counter init:  {}", cfg.counter_init);
    println!("[*] pht entries:   {}", cfg.pht_size);
    println!();
    println!("[*] total events:  {}", stats.total());
    println!("[*] hit:           {}", stats.good);
    println!("[*] miss:          {}", stats.miss);
    println!("[*] no-prediction: {}", stats.none);
    println!("[*] hit rate:      {:.4}%", stats.hit_rate());
    println!("[*] miss rate:     {:.4}%", stats.miss_rate());
}
