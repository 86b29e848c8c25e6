use anyhow::{Result, anyhow};
use bouquin::cli;
use bouquin::client::BookClient;
use bouquin::config::Config;
use bouquin::context::StandardContext;
use bouquin::controller::{
    CreateController, CreateOutcome, DetailController, DetailState, ListController, ListState,
    SignInController, SignUpController,
};
use bouquin::model::{Book, BookForm};
use bouquin::session;
use simplelog::{ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Remove `name <value>` from args and return the value.
fn take_flag(args: &mut Vec<String>, name: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == name)?;
    if pos + 1 >= args.len() {
        return None;
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Some(value)
}

/// Remove a bare switch from args, reporting whether it was present.
fn take_switch(args: &mut Vec<String>, names: &[&str]) -> bool {
    if let Some(pos) = args.iter().position(|a| names.contains(&a.as_str())) {
        args.remove(pos);
        true
    } else {
        false
    }
}

fn confirm(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y" | "yes")
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn apply_field_flags(args: &mut Vec<String>, form: &mut BookForm) {
    if let Some(v) = take_flag(args, "--title") {
        form.title = v;
    }
    if let Some(v) = take_flag(args, "--author") {
        form.author = v;
    }
    if let Some(v) = take_flag(args, "--genre") {
        form.genre = v;
    }
    if let Some(v) = take_flag(args, "--description") {
        form.description = v;
    }
    if let Some(v) = take_flag(args, "--year") {
        form.year = v;
    }
    if let Some(v) = take_flag(args, "--price") {
        form.price = v;
    }
    if take_switch(args, &["--unavailable"]) {
        form.available = false;
    }
    if take_switch(args, &["--available"]) {
        form.available = true;
    }
}

fn print_book(book: &Book) {
    println!("{}", book.title);
    println!("  by {}", book.author);
    if let Some(desc) = &book.description
        && !desc.is_empty()
    {
        println!("  {}", desc);
    }
    let mut meta: Vec<String> = Vec::new();
    if let Some(genre) = &book.genre
        && !genre.is_empty()
    {
        meta.push(genre.clone());
    }
    if let Some(year) = book.year {
        meta.push(year.to_string());
    }
    if let Some(price) = book.price {
        meta.push(format!("{:.2}", price));
    }
    meta.push(if book.available { "Available" } else { "Unavailable" }.to_string());
    println!("  {}", meta.join(" | "));
    if let Some(added_by) = &book.added_by {
        println!("  added by: {}", added_by.display());
    }
    println!("  id: {}", book.id);
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().collect();
    let binary_name = args.remove(0);
    let binary_name = binary_name.rsplit('/').next().unwrap_or("bouquin").to_string();

    if args.is_empty()
        || args
            .iter()
            .any(|a| a == "--help" || a == "-h" || a == "help")
    {
        cli::print_help(&binary_name);
        return Ok(());
    }

    let verbose = take_switch(&mut args, &["-v", "--verbose"]);
    let root_override = take_flag(&mut args, "--root")
        .or_else(|| take_flag(&mut args, "-r"))
        .map(PathBuf::from);
    let url_override = take_flag(&mut args, "--url");
    let token_override = take_flag(&mut args, "--token");
    let password_flag = take_flag(&mut args, "--password");

    let _ = TermLogger::init(
        if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        },
        LogConfig::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    if args.is_empty() {
        cli::print_help(&binary_name);
        return Ok(());
    }

    let ctx = Arc::new(StandardContext::new(root_override));
    let mut config = match Config::load(ctx.as_ref()) {
        Ok(c) => c,
        Err(e) if Config::is_missing_config_error(&e) => Config::default(),
        Err(e) => return Err(e),
    };

    let command = args.remove(0);

    // set-url only touches the config file; no client needed.
    if command == "set-url" {
        let url = args
            .first()
            .ok_or_else(|| anyhow!("set-url needs a base URL"))?;
        config.base_url = url.strip_suffix('/').unwrap_or(url).to_string();
        config.save(ctx.as_ref())?;
        println!(
            "Base URL set to {} ({})",
            config.base_url,
            Config::get_path_string(ctx.as_ref())?
        );
        return Ok(());
    }

    let session = session::shared(&config.base_url);
    if let Some(url) = &url_override
        && let Ok(mut s) = session.write()
    {
        s.set_base_url(url);
    }
    if let Some(token) = &token_override
        && let Ok(mut s) = session.write()
    {
        s.set_token(token);
    }
    let client = BookClient::new(session.clone());

    match command.as_str() {
        "list" => {
            let mut ctl = ListController::new(config.page, config.page_size);
            if let Some(query) = args.first() {
                ctl.set_query(query);
            }
            ctl.load(&client).await;
            match ctl.state() {
                ListState::Ready => {
                    let books = ctl.filtered();
                    if books.is_empty() {
                        println!("No books matched.");
                    }
                    for book in books {
                        println!(
                            "{}  {} — {}{}",
                            book.id,
                            book.title,
                            book.author,
                            if book.available { "" } else { "  (unavailable)" }
                        );
                    }
                }
                ListState::Error(msg) => return Err(anyhow!("Failed to load books: {}", msg)),
                _ => {}
            }
        }

        "show" => {
            let id = args.first().ok_or_else(|| anyhow!("show needs a book id"))?;
            let mut ctl = DetailController::new(id);
            ctl.load(&client).await;
            match ctl.state() {
                DetailState::Ready => {
                    if let Some(book) = ctl.book() {
                        print_book(book);
                    }
                }
                DetailState::Missing => println!("Book not found."),
                DetailState::Error(msg) => return Err(anyhow!("Failed to load book: {}", msg)),
                DetailState::Loading => {}
            }
        }

        "new" => {
            let mut ctl = CreateController::new();
            apply_field_flags(&mut args, ctl.form_mut());
            match ctl.submit(&client).await {
                Ok(CreateOutcome::ShowDetail(id)) => println!("Created {}", id),
                Ok(CreateOutcome::Back) => println!("Created."),
                Err(msg) => return Err(anyhow!("Create failed: {}", msg)),
            }
        }

        "edit" => {
            let id = args.first().cloned().ok_or_else(|| anyhow!("edit needs a book id"))?;
            args.remove(0);
            let mut ctl = DetailController::new(&id);
            ctl.load(&client).await;
            match ctl.state() {
                DetailState::Ready => {}
                DetailState::Missing => return Err(anyhow!("Book not found.")),
                DetailState::Error(msg) => return Err(anyhow!("Failed to load book: {}", msg)),
                DetailState::Loading => {}
            }
            ctl.begin_edit();
            apply_field_flags(&mut args, ctl.form_mut());
            match ctl.save(&client).await {
                Ok(()) => {
                    println!("Saved.");
                    if let Some(book) = ctl.book() {
                        print_book(book);
                    }
                }
                Err(msg) => return Err(anyhow!("Save failed: {}", msg)),
            }
        }

        "delete" => {
            let skip_prompt = take_switch(&mut args, &["--yes", "-y"]);
            let id = args.first().ok_or_else(|| anyhow!("delete needs a book id"))?;
            if !skip_prompt && !confirm("Delete this book?") {
                println!("Cancelled.");
                return Ok(());
            }
            let mut ctl = DetailController::new(id);
            match ctl.delete(&client).await {
                Ok(()) => println!("Deleted."),
                Err(msg) => return Err(anyhow!("Delete failed: {}", msg)),
            }
        }

        "signin" => {
            let mut ctl = SignInController::new();
            ctl.email = args
                .first()
                .cloned()
                .unwrap_or_else(|| prompt_line("Email: ").unwrap_or_default());
            ctl.password = match password_flag {
                Some(pw) => pw,
                None => prompt_line("Password: ")?,
            };
            match ctl.submit(&client).await {
                Ok(()) => println!("Signed in. The token is held for this run only."),
                Err(msg) => return Err(anyhow!("Sign-in failed: {}", msg)),
            }
        }

        "signup" => {
            let mut ctl = SignUpController::new();
            ctl.username = args
                .first()
                .cloned()
                .ok_or_else(|| anyhow!("signup needs a username and an email"))?;
            ctl.email = args
                .get(1)
                .cloned()
                .ok_or_else(|| anyhow!("signup needs a username and an email"))?;
            match password_flag {
                Some(pw) => {
                    ctl.password = pw.clone();
                    ctl.confirm = pw;
                }
                None => {
                    ctl.password = prompt_line("Password: ")?;
                    ctl.confirm = prompt_line("Confirm password: ")?;
                }
            }
            match ctl.submit(&client).await {
                Ok(outcome) => match outcome {
                    bouquin::client::SignupOutcome::SignedIn => {
                        println!("Account created and signed in.")
                    }
                    bouquin::client::SignupOutcome::RedirectToSignIn => {
                        println!("Account created. Please sign in.")
                    }
                },
                Err(msg) => return Err(anyhow!("Sign-up failed: {}", msg)),
            }
        }

        other => {
            eprintln!("Unknown command: {}", other);
            cli::print_help(&binary_name);
        }
    }

    Ok(())
}
