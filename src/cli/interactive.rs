use std::{
    io::{self, BufRead, Write},
    time::Duration,
};

use crate::{
    cli::scrobble::{BatchRequest, execute_batch},
    error::{Result, ScrobbleError},
    lastfm::Scrobbler,
    management::BatchSubmitter,
    utils, warning,
};

const QUIT: &str = "quit";

/// Interactive mode: authenticate, then prompt for batches until `quit`.
///
/// Authentication happens before stdin is locked for the prompt loop, since
/// the console confirmation reads stdin itself.
pub async fn interactive(scrobbler: &mut Scrobbler) -> Result<()> {
    scrobbler.ensure_authenticated().await?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    prompt_loop(scrobbler, &mut input, Duration::from_secs(1)).await?;
    Ok(())
}

/// Reads batch requests from `input` and runs them. Returns the number of
/// batches run. End of input behaves like `quit`.
pub async fn prompt_loop<S, R>(submitter: &mut S, input: &mut R, pause: Duration) -> Result<usize>
where
    S: BatchSubmitter + ?Sized,
    R: BufRead,
{
    let mut runs = 0;

    while let Some(request) = read_request(input)? {
        execute_batch(submitter, &request, pause).await;
        runs += 1;
    }

    Ok(runs)
}

/// Prompts for one batch. `None` means the user quit.
pub fn read_request<R: BufRead>(input: &mut R) -> Result<Option<BatchRequest>> {
    println!("\n=== Last.fm Scrobbler ===");

    let artist = loop {
        let Some(artist) = prompt(input, "Artist name (or 'quit' to exit): ")? else {
            return Ok(None);
        };
        if artist.trim().eq_ignore_ascii_case(QUIT) {
            return Ok(None);
        }
        if artist.trim().is_empty() {
            warning!("Artist name must not be empty.");
            continue;
        }
        break artist;
    };

    let Some(title) = prompt(input, "Track title: ")? else {
        return Ok(None);
    };

    let Some(count) = prompt_parsed(input, "Number of scrobbles (max 1000): ", utils::parse_count)?
    else {
        return Ok(None);
    };

    let Some(backdate) = prompt(input, "Backdate scrobbles? (y/n): ")? else {
        return Ok(None);
    };

    let start_time = if utils::parse_yes_no(&backdate) {
        let Some(start_time) =
            prompt_parsed(input, "How many days ago to start from? ", utils::parse_start_time)?
        else {
            return Ok(None);
        };
        Some(start_time)
    } else {
        None
    };

    Ok(Some(BatchRequest {
        artist,
        title,
        count,
        start_time,
    }))
}

/// Asks until `parse` accepts the answer.
fn prompt_parsed<R, T>(
    input: &mut R,
    label: &str,
    parse: fn(&str) -> Result<T>,
) -> Result<Option<T>>
where
    R: BufRead,
{
    loop {
        let Some(raw) = prompt(input, label)? else {
            return Ok(None);
        };
        match parse(&raw) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => warning!("{}", e),
        }
    }
}

fn prompt<R: BufRead>(input: &mut R, label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout()
        .flush()
        .map_err(|e| ScrobbleError::Input(e.to_string()))?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| ScrobbleError::Input(e.to_string()))?;
    if read == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
