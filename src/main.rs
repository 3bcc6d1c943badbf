//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use huffzip::compression::compress::{compress_file, Compressed};
use huffzip::compression::decompress::decompress_file;
use huffzip::compression::verify::test_file;
use huffzip::tools::cli::{hzopts_init, HzOpts, Mode};
use huffzip::tools::report::{code_table_report, freq_table_report, size_report, tree_report};

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    // Available log levels are Error, Warn, Info, Debug, Trace
    if TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("Logger already initialized.");
    }

    let options = hzopts_init();

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Zip => compress_file(&options).map(|compressed| print_run(&options, &compressed)),
        Mode::Unzip => decompress_file(&options)
            .map(|summary| info!("Wrote {} symbols.", summary.symbols)),
        Mode::Test => test_file(&options).map(|report| {
            print_run(&options, &report.compressed);
            println!("SUCCESS: {} decodes back to the original.", report.compressed_file);
        }),
    };

    match result {
        Ok(()) => info!("Done.\n"),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Show the tables if asked, and the size summary.
fn print_run(opts: &HzOpts, compressed: &Compressed) {
    if opts.show_tables {
        println!("{}", freq_table_report(&compressed.table));
        println!("{}", code_table_report(&compressed.codes));
        println!("{}", tree_report(&compressed.tree));
    }
    println!("{}: {}", opts.file, size_report(compressed));
}
