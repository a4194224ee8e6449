//! Prints an argon2 hash for `EDITOR_PASSWORD_HASH`.
//!
//! Usage: `hash-password <password>`

use anyhow::{bail, Context};
use job_board_backend::utils::crypto::hash_password;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(password) = args.next() else {
        bail!("usage: hash-password <password>");
    };
    if args.next().is_some() {
        bail!("expected exactly one argument");
    }
    let hash = hash_password(&password).context("hashing password")?;
    println!("{}", hash);
    Ok(())
}
