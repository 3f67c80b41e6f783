//! Wiring the author service with and without a pretty printer.
//!
//! Run with `RUST_LOG=lection=debug` to watch the context being built.

use lection::domain::{Author, DomainError, PrinterKind};
use lection::{AppError, AppResult, Settings, bootstrap, find_author, telemetry};

fn main() -> AppResult<()> {
    telemetry::init("lection=info");

    let authors = vec![
        Author::new().with_id(1).with_name("plato"),
        Author::new().with_id(2).with_name("Aristotle"),
    ];

    for printer in [PrinterKind::Capitalize, PrinterKind::None] {
        let settings = Settings {
            pretty_printer: printer,
            authors: authors.clone(),
            ..Settings::default()
        };

        // Repository, optional printer and service, built eagerly
        let context = bootstrap(&settings)?;
        println!("--- printer: {printer:?} ---");
        print!("{}", context.describe());

        for id in [1, 2] {
            let author = find_author(&context, id)?;
            println!("author {id}: {:?}", author.name());
        }

        match find_author(&context, 99) {
            Err(AppError::Domain(err @ DomainError::NotFound { .. })) => println!("author 99: {err}"),
            other => println!("author 99: unexpected {other:?}"),
        }
    }

    Ok(())
}
