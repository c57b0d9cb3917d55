use clap::Parser;
use exprserver::server::Server;

/// exprserver answers line-protocol requests that evaluate arithmetic
/// expressions over variable ranges and aggregate the results.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Port the server listens on.
    port: u16,
}

fn main() {
    let args = Args::parse();

    let server = Server::new(args.port);
    if let Err(e) = server.run() {
        eprintln!("Unable to start the Server: {e}");
        std::process::exit(1);
    }
}
