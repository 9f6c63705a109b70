//
//  testrail-cli
//  interactive/prompt.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Interactive Prompts Module
//!
//! Thin wrappers over `dialoguer` for the few questions the CLI asks:
//! server details during `auth login` and confirmation before destructive
//! calls.
//!
//! # Example
//!
//! ```no_run
//! use testrail_cli::interactive::prompt::{prompt_input, prompt_password};
//!
//! let user = prompt_input("TestRail user (email):").unwrap();
//! let api_key = prompt_password("API key:").unwrap();
//! ```

use anyhow::Result;
use dialoguer::{Confirm, Input, Password};

use super::Cancelled;

/// Prompts for non-empty text input.
pub fn prompt_input(message: &str) -> Result<String> {
    let input: String = Input::new().with_prompt(message).interact_text()?;
    Ok(input)
}

/// Prompts for text input pre-filled with `default`.
pub fn prompt_input_with_default(message: &str, default: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(message)
        .default(default.to_string())
        .interact_text()?;
    Ok(input)
}

/// Prompts for a secret without echoing it.
pub fn prompt_password(message: &str) -> Result<String> {
    let password = Password::new().with_prompt(message).interact()?;
    Ok(password)
}

pub fn prompt_confirm_with_default(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}

/// Asks before a destructive operation unless `assume_yes` is set.
///
/// Declining yields a [`Cancelled`] error. With prompts disabled nothing is
/// asked and the answer is "no".
pub fn confirm_or_cancel(message: &str, assume_yes: bool, no_prompt: bool) -> Result<()> {
    if assume_yes {
        return Ok(());
    }
    if no_prompt {
        tracing::warn!("Prompts are disabled; pass --yes to confirm: {}", message);
        return Err(Cancelled.into());
    }
    if prompt_confirm_with_default(message, false)? {
        Ok(())
    } else {
        Err(Cancelled.into())
    }
}
