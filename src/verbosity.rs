use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

#[derive(Debug, Clone, Parser)]
pub struct VerbosityArgs {
    #[clap(long, help = "Log raw request/response traffic to the tokenization service")]
    log_traffic: bool,
    #[clap(long, help = "Use if a logger is already initialized")]
    persist_logger: bool,
}

impl VerbosityArgs {
    pub fn setup_logging(&self) {
        if !self.persist_logger {
            let mut builder = Builder::new();
            builder.filter_level(LevelFilter::Warn);
            builder.filter_module("tokenize_image", LevelFilter::Info);
            if self.log_traffic {
                builder.filter_module("tokenize_image::tokenizer", LevelFilter::Trace);
                builder.filter_module("reqwest", LevelFilter::Trace);
            }
            builder.parse_default_env();

            builder.init();
        }
    }
}
