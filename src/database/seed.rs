use anyhow::Result;
use rusqlite::Connection;

use super::{badges, history, players};
use crate::config::DEFAULT_BOARD_ID;

struct SamplePlayer {
    nickname: &'static str,
    slogan: &'static str,
    badges: &'static [(&'static str, &'static str)],
    events: &'static [(i64, &'static str)],
}

const SAMPLE_PLAYERS: [SamplePlayer; 4] = [
    SamplePlayer {
        nickname: "AceHigh",
        slogan: "Stack 'em high, rake it in.",
        badges: &[("🏆", "Season opener champion")],
        events: &[
            (420, "Season opener victory"),
            (380, "Heads-up challenge sweep"),
            (460, "Cash game heater"),
        ],
    },
    SamplePlayer {
        nickname: "RiverQueen",
        slogan: "Read the table, rule the river.",
        badges: &[("🌊", "Rules the river"), ("🎗️", "Charity bounty donor")],
        events: &[
            (300, "Weekly league win"),
            (260, "Rebuy tournament runner-up"),
            (220, "Cash game gain"),
            (-40, "Charity bounty buy-in"),
        ],
    },
    SamplePlayer {
        nickname: "LuckyChip",
        slogan: "Good vibes, better cards.",
        badges: &[],
        events: &[
            (150, "Welcome knockout bonus"),
            (210, "Sit & go victory"),
            (190, "Weekend ring game"),
            (160, "Tuesday turbo event"),
        ],
    },
    SamplePlayer {
        nickname: "SilentShark",
        slogan: "Let the chips do the talking.",
        badges: &[("🦈", "Heads-up specialist")],
        events: &[
            (180, "Mixed game podium finish"),
            (210, "Cash game session"),
            (120, "Heads-up challenge"),
            (130, "League points"),
        ],
    },
];

fn avatar_for(nickname: &str) -> String {
    format!(
        "https://api.dicebear.com/7.x/initials/svg?seed={nickname}&backgroundType=gradientLinear&fontSize=40"
    )
}

/// Populates an empty database with starter players. Returns false if players already exist.
pub fn seed_sample_data(conn: &Connection) -> Result<bool> {
    if players::count(conn)? > 0 {
        log::info!("Database already has players, skipping sample data");
        return Ok(false);
    }

    let tx = conn.unchecked_transaction()?;
    for sample in &SAMPLE_PLAYERS {
        let avatar = avatar_for(sample.nickname);
        let player = players::insert_player(&tx, sample.nickname, sample.slogan, Some(&avatar))?;
        for (delta, reason) in sample.events {
            history::insert_entry(&tx, player.id, DEFAULT_BOARD_ID, *delta, reason)?;
        }
        for (icon, label) in sample.badges {
            badges::insert_badge(&tx, player.id, icon, label)?;
        }
    }
    tx.commit()?;

    log::info!("Seeded {} sample players", SAMPLE_PLAYERS.len());
    Ok(true)
}
