use clap::Parser;
use solrload::cli::Cli;
use solrload::exit::Exit;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // clap exits with 2 on bad arguments, which is taken by task source errors
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                Exit::Usage.into()
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    solrload::observability::init(cli.verbose);

    solrload::app::run(cli).await.into()
}
