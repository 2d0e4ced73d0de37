use git_chdiff::adapter;
use git_chdiff::config::ChdiffConfig;
use std::process;

fn main() {
    env_logger::init();

    let code = adapter::run(std::env::args_os(), &ChdiffConfig::default());
    process::exit(code);
}
