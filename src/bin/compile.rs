use clap::Parser;
use fs_err::File;
use log::info;
use misparim::{lexicon::MemoryLexicon, Error};
use std::{io::BufWriter, path::PathBuf};

/// Compiles a morphology dump into a lexicon binary.
#[derive(Parser)]
#[clap(version = "1.0")]
struct Opts {
    /// Dump with one `base<TAB>reading` pair per line.
    #[clap(long)]
    dump: PathBuf,
    #[clap(long)]
    out: PathBuf,
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let opts = Opts::parse();

    let lexicon = MemoryLexicon::from_dump_path(&opts.dump)?;
    lexicon.to_writer(BufWriter::new(File::create(&opts.out)?))?;

    info!("wrote lexicon with {} base forms", lexicon.len());
    Ok(())
}
