use std::{
    error::Error,
    io::{BufRead, BufReader, Write},
    net::{TcpListener, TcpStream},
    sync::Arc,
    thread,
    time::Instant,
};

use chrono::Local;

use crate::{
    engine,
    request::{self, Request, StatKind},
    stats::ServerStats,
};

/// Line a client sends to close its connection.
const QUIT_COMMAND: &str = "BYE";

/// The TCP boundary: accepts connections and serves each on its own
/// thread. The computation core is stateless, so handler threads share
/// nothing but the statistics collector.
pub struct Server {
    port:  u16,
    stats: Arc<ServerStats>,
}

impl Server {
    /// Creates a server that will listen on the given port.
    #[must_use]
    pub fn new(port: u16) -> Self {
        Self { port,
               stats: Arc::new(ServerStats::new()), }
    }

    /// Binds the listener and accepts connections until the process is
    /// stopped. Accept errors are logged and do not stop the listener.
    ///
    /// # Errors
    /// Returns the I/O error if the listen port cannot be bound.
    pub fn run(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind(("0.0.0.0", self.port))?;
        println!("[{}] Server started, listening on port {}", timestamp(), self.port);

        for stream in listener.incoming() {
            match stream {
                Ok(socket) => {
                    let peer = socket.peer_addr()
                                     .map_or_else(|_| "unknown".to_string(), |a| a.to_string());
                    println!("[{}] New connection from client: {peer}", timestamp());

                    let stats = Arc::clone(&self.stats);
                    thread::spawn(move || handle_client(&socket, &stats, &peer));
                },
                Err(e) => {
                    eprintln!("[{}] Error accepting client connection: {e}", timestamp());
                },
            }
        }

        Ok(())
    }
}

/// Serves one client connection: reads request lines, writes one response
/// line per request, and stops on the quit command, end of stream or an
/// I/O error. A failing request yields an error response and never
/// affects other requests or connections.
fn handle_client(socket: &TcpStream, stats: &ServerStats, peer: &str) {
    let reader = match socket.try_clone() {
        Ok(clone) => BufReader::new(clone),
        Err(e) => {
            eprintln!("[{}] IO error on client {peer}: {e}", timestamp());
            return;
        },
    };
    let mut writer = socket;

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("[{}] IO error on client {peer}: {e}", timestamp());
                break;
            },
        };

        let Some(response) = respond(&line, stats) else {
            break;
        };
        if writeln!(writer, "{response}").is_err() {
            break;
        }
    }

    println!("[{}] Client {peer} disconnected from Server", timestamp());
}

/// Produces the response line for one request line, or `None` when the
/// client asked to disconnect.
///
/// Successful requests are timed and answered as
/// `OK;<elapsed-seconds to 3 decimals>;<result>`, and the truncated
/// elapsed value is recorded into the statistics. Any failure is answered
/// as `ERR: <message>` and recorded nowhere.
///
/// This is the whole per-request path minus socket I/O, which is what the
/// integration tests drive.
#[must_use]
pub fn respond(line: &str, stats: &ServerStats) -> Option<String> {
    if line == QUIT_COMMAND {
        return None;
    }

    let started = Instant::now();
    Some(match execute(line, stats) {
             Ok(result) => {
                 let elapsed = format!("{:.3}", started.elapsed().as_secs_f64());
                 stats.record_response(elapsed.parse().unwrap_or_default());
                 format!("OK;{elapsed};{result}")
             },
             Err(e) => format!("ERR: {e}"),
         })
}

/// Decodes and processes one request line into its formatted result.
fn execute(line: &str, stats: &ServerStats) -> Result<String, Box<dyn Error>> {
    match request::parse_request(line)? {
        Request::Computation(computation) => Ok(engine::format_result(computation.compute()?)),

        #[allow(clippy::cast_precision_loss)]
        Request::Stat(kind) => {
            let value = match kind {
                StatKind::Reqs => stats.total_responses() as f64,
                StatKind::AvgTime => stats.average_time(),
                StatKind::MaxTime => stats.max_time(),
            };
            Ok(engine::format_result(value))
        },
    }
}

/// Timestamp prefix for the connection lifecycle log lines.
fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
