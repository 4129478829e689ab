use bf_tape::cli_util::print_engine_error;
use bf_tape::{Engine, EngineError, StepControl};
use clap::Parser;
use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::time::Duration;
use std::{env, fs, thread};

#[derive(Parser, Debug)]
#[command(
    name = "bft",
    version,
    about = "Run Brainfuck programs on a growable memory tape"
)]
struct Cli {
    /// Concatenated Brainfuck code parts; read from stdin when omitted
    #[arg(value_name = "CODE", trailing_var_arg = true)]
    code: Vec<String>,

    /// Read Brainfuck code from PATH instead of positional CODE
    #[arg(short = 'f', long = "file")]
    file: Option<String>,

    /// Bytes fed to ',' given as a UTF-8 string (default: empty input)
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Read the bytes fed to ',' from PATH
    #[arg(long = "input-file")]
    input_file: Option<String>,

    /// Wall-clock timeout in milliseconds, 0 to disable (fallback BFT_TIMEOUT_MS; default 2_000)
    #[arg(long = "timeout", value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Maximum interpreter steps before abort (fallback BFT_MAX_STEPS; default unlimited)
    #[arg(long = "max-steps", value_name = "N")]
    max_steps: Option<u64>,
}

fn main() {
    // We still pull the program name for error rendering consistency
    let program = env::args().next().unwrap_or_else(|| String::from("bft"));
    let cli = Cli::parse();
    std::process::exit(run(&program, cli));
}

fn run(program: &str, cli: Cli) -> i32 {
    let Cli {
        code,
        file,
        input,
        input_file,
        timeout_ms,
        max_steps,
    } = cli;

    if file.is_some() && !code.is_empty() {
        eprintln!("{program}: cannot use positional code together with --file");
        let _ = io::stderr().flush();
        return 2;
    }

    if input.is_some() && input_file.is_some() {
        eprintln!("{program}: cannot use --input together with --input-file");
        let _ = io::stderr().flush();
        return 2;
    }

    let code_str = if let Some(path) = file {
        match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{program}: failed to read code file as UTF-8: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
        }
    } else if !code.is_empty() {
        code.join("")
    } else {
        let mut s = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut s) {
            eprintln!("{program}: failed reading code from stdin: {e}");
            let _ = io::stderr().flush();
            return 1;
        }
        s
    };

    let input_bytes: Vec<u8> = match (input, input_file) {
        (Some(text), None) => text.into_bytes(),
        (None, Some(path)) => match fs::read(&path) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("{program}: failed to read input file: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
        },
        _ => Vec::new(),
    };

    // Resolve limits: flags -> env -> defaults
    let timeout_ms = timeout_ms
        .or_else(|| {
            env::var("BFT_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
        })
        .unwrap_or(2_000);
    let max_steps = max_steps.or_else(|| {
        env::var("BFT_MAX_STEPS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
    });

    // Execute on a worker thread with cooperative cancellation
    let cancel = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel::<Result<Vec<u8>, EngineError>>();
    let code_owned = code_str.clone();
    let cancel_worker = cancel.clone();

    thread::spawn(move || {
        let engine = Engine::new(code_owned);
        let ctrl = StepControl::new(max_steps.map(|n| n as usize), cancel_worker);
        let _ = tx.send(engine.run_with_control(&input_bytes, ctrl));
    });

    // Ctrl+c cancels the run cooperatively; the worker reports Canceled.
    let cancel_signal = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        cancel_signal.store(true, Ordering::Relaxed);
    }) {
        eprintln!("{program}: failed to set ctrl+c handler: {e}");
        let _ = io::stderr().flush();
        return 1;
    }

    let received = if timeout_ms == 0 {
        rx.recv().map_err(|_| mpsc::RecvTimeoutError::Disconnected)
    } else {
        rx.recv_timeout(Duration::from_millis(timeout_ms))
    };

    match received {
        Ok(Ok(output)) => {
            let mut stdout = io::stdout().lock();
            let _ = stdout.write_all(&output);
            // For readability, ensure output ends with a newline
            let _ = stdout.write_all(b"\n");
            let _ = stdout.flush();
            0
        }
        Ok(Err(err @ (EngineError::StepLimitExceeded { .. } | EngineError::Canceled))) => {
            eprintln!("{err}");
            let _ = io::stderr().flush();
            1
        }
        Ok(Err(other)) => {
            print_engine_error(Some(program), &code_str, &other);
            let _ = io::stderr().flush();
            1
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            cancel.store(true, Ordering::Relaxed);
            eprintln!("Execution aborted: wall-clock timeout exceeded ({timeout_ms} ms)");
            let _ = io::stderr().flush();
            1
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => 1,
    }
}
