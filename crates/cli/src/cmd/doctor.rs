use templator_core::config::{ResolvedConfig, default_config_path};

pub fn run(cfg: &ResolvedConfig) {
    println!("OK   templator doctor");
    match cfg.source {
        Some(ref p) => println!("path: {}", p.display()),
        None => println!("path: (defaults; no file at {})", default_config_path().display()),
    }
    println!("version: {}", templator_core::version());
    println!("coercion.mode: {}", cfg.coercion.mode);
    println!("logging.level: {}", cfg.logging.level);
    if let Some(ref file) = cfg.logging.file {
        println!("logging.file: {}", file.display());
    }
}
