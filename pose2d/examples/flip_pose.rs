use pose2d::{EditorConfig, EditorSession, PrimitiveId, Side};
use std::collections::BTreeSet;
use std::path::PathBuf;

fn main() {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut positional = Vec::<String>::new();
    let mut pretty = false;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--pretty" => {
                pretty = true;
                i += 1;
            }
            "--config" => {
                config_path = args.get(i + 1).map(PathBuf::from);
                i += 2;
            }
            other => {
                positional.push(other.to_string());
                i += 1;
            }
        }
    }

    let Some(input_path) = positional.first().map(PathBuf::from) else {
        eprintln!("usage: flip_pose <pose.json> [--pretty] [--config <config.json>]");
        std::process::exit(2);
    };

    let config = match config_path {
        Some(path) => {
            let json = std::fs::read_to_string(path).expect("read config");
            EditorConfig::from_json_str(&json).expect("parse config")
        }
        None => EditorConfig::default(),
    };

    let json = std::fs::read_to_string(&input_path).expect("read pose json");
    let mut session = EditorSession::new(config);
    let mut surface = BTreeSet::<PrimitiveId>::new();
    let skipped = session
        .load_json_str(&json, &mut surface)
        .expect("parse pose json");
    for entity in &skipped {
        eprintln!("skipped {} #{}: {}", entity.kind, entity.index, entity.error);
    }

    let ids = session.people().iter().map(|p| p.id()).collect::<Vec<_>>();
    for id in ids {
        let Some(person) = session.person_mut(id) else {
            continue;
        };
        person.body_mut().flip().expect("flip body");
        // Hands follow the mirrored wrists.
        if !person.is_animal() {
            let left = person.detach_hand(Side::Left);
            let right = person.detach_hand(Side::Right);
            if let Some(hand) = right {
                person.set_hand(Side::Left, hand).expect("move hand");
            }
            if let Some(hand) = left {
                person.set_hand(Side::Right, hand).expect("move hand");
            }
        }
    }

    let document = session.to_document();
    let out = if pretty {
        document.to_json_string_pretty()
    } else {
        document.to_json_string()
    }
    .expect("serialize pose json");
    println!("{out}");
}
