//! Encoding an object graph with shared nodes and a cycle.
//!
//! Run with: cargo run --example object_graph

use serde::Serialize;
use serde_graphjson::time::EpochMillis;
use serde_graphjson::{to_string, Shared};
use std::error::Error;

#[derive(Debug, Serialize)]
enum Status {
    Open,
    Closed,
}

#[derive(Serialize)]
struct Person {
    name: String,
    manager: Option<Shared<Person>>,
}

#[derive(Serialize)]
struct Ticket {
    id: u32,
    status: Status,
    opened: EpochMillis,
    reporter: Shared<Person>,
    assignee: Shared<Person>,
    _scratch: Vec<u8>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let boss = Shared::new(Person {
        name: "Grace".to_string(),
        manager: None,
    });
    let dev = Shared::new(Person {
        name: "Linus".to_string(),
        manager: Some(boss.clone()),
    });

    let ticket = Ticket {
        id: 7,
        status: Status::Open,
        opened: EpochMillis::new(0),
        reporter: boss.clone(),
        assignee: dev,
        _scratch: vec![1, 2, 3],
    };
    println!("{}", to_string(&ticket)?);

    // Grace now reports to herself.
    boss.borrow_mut().manager = Some(boss.clone());
    match to_string(&ticket) {
        Ok(text) => println!("unexpected output: {}", text),
        Err(err) => println!("refused: {}", err),
    }
    boss.borrow_mut().manager = None;

    println!("{}", to_string(&vec![Status::Open, Status::Closed])?);
    Ok(())
}
