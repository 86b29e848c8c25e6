// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help(binary_name: &str) {
    println!(
        "Bouquin v{} - Small, fast client for a book-catalog REST API",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] <COMMAND>", binary_name);
    println!();
    println!("COMMANDS:");
    println!("    list [<query>]                 List books, optionally filtered");
    println!("    show <id>                      Show one book");
    println!("    new [FIELDS]                   Create a book");
    println!("    edit <id> [FIELDS]             Edit a book");
    println!("    delete <id> [--yes]            Delete a book (asks first)");
    println!("    signin <email>                 Sign in; the token lives for this run only");
    println!("    signup <username> <email>      Create an account");
    println!("    set-url <base-url>             Persist the API base URL");
    println!();
    println!("FIELDS:");
    println!("    --title <t> --author <a> --genre <g> --description <d>");
    println!("    --year <y> --price <p> --unavailable");
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config.");
    println!("    --url <base-url>      Override the API base URL for this run.");
    println!("    --token <jwt>         Attach a bearer token without signing in.");
    println!("    --password <pw>       Password for signin/signup (else prompted).");
    println!("    -v, --verbose         Debug logging.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("EXAMPLES:");
    println!("    {} list gatsby", binary_name);
    println!(
        "    {} new --title \"The Great Gatsby\" --author Fitzgerald --genre Novel --year 1925 --price 9.99",
        binary_name
    );
    println!("    {} --url http://192.168.1.195:3000 signin admin@example.com", binary_name);
}
