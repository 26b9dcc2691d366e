use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use blogkit_rs::initialize_db;

/// A utility for creating a database pre-filled with demo categories and
/// posts for blogkit_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let connection = Connection::open(output_path)?;

    initialize_db(&connection)?;

    println!("Creating demo categories and posts...");

    let categories = ["Tutorials", "News", "Snippets"];
    let now = OffsetDateTime::now_utc();

    for name in categories {
        connection.execute(
            "INSERT INTO category (name, created_at) VALUES (?1, ?2)",
            (name, now),
        )?;
    }

    let posts = [
        (
            "Getting started with the blog",
            "Welcome!\n\nThis demo database has a few posts spread across the \
            categories so the search, filter, and sort pages have something \
            to show.",
            1,
        ),
        (
            "Working with forms",
            "Every write goes through an HTML form, gets validated on the \
            server, and redirects on success so a refresh cannot resubmit it.",
            1,
        ),
        (
            "Version 0.4 released",
            "The browse page now combines searching, filtering, and sorting \
            in a single query.",
            2,
        ),
        (
            "One-liner: counting posts per category",
            "A LEFT JOIN with COUNT keeps categories with zero posts in the \
            listing.",
            3,
        ),
    ];

    for (index, (title, content, category_id)) in posts.iter().enumerate() {
        let created_at = now - Duration::days((posts.len() - index) as i64);

        connection.execute(
            "INSERT INTO post (title, content, category_id, created_at) VALUES (?1, ?2, ?3, ?4)",
            (title, content, category_id, created_at),
        )?;
    }

    println!("Success!");

    Ok(())
}
