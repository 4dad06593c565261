use aja_core::entities::{UserDraft, UserRecord};
use aja_core::enums::Capability;
use aja_state::admin::UserDirectory;
use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DeleteResponse {
    deleted: String,
    remaining: usize,
}

/// Handle `aja user <subcommand>`.
pub async fn handle(
    action: &UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.auth.require(Capability::ManageUsers)?;
    let mut directory = UserDirectory::default();

    match action {
        UserCommands::List { role } => {
            directory.refresh(&ctx.client).await?;
            directory.set_tab(*role);
            let visible = directory.visible();
            let limit = effective_limit(flags.limit, visible.len());
            output(&visible.into_iter().take(limit).collect::<Vec<_>>(), flags.format)
        }
        UserCommands::Add {
            username,
            password,
            role,
            status,
        } => {
            let draft = UserDraft {
                role: *role,
                status: (*status).into(),
                password: Some(password.clone()),
                ..UserDraft::new(username.trim())
            };
            directory.add(&ctx.client, &draft).await?;
            let added = directory.find(draft.username.as_str()).cloned();
            output(&added.unwrap_or_else(|| placeholder(&draft)), flags.format)
        }
        UserCommands::Update {
            user,
            username,
            role,
            status,
            password,
        } => {
            directory.refresh(&ctx.client).await?;
            let current = find(&directory, user)?;
            let id = current.id.clone();
            let mut draft = UserDraft::from(current);
            if let Some(username) = username {
                draft.username = username.trim().to_string();
            }
            if let Some(role) = role {
                draft.role = *role;
            }
            if let Some(status) = status {
                draft.status = (*status).into();
            }
            draft.password.clone_from(password);
            directory.update(&ctx.client, &id, &draft).await?;
            let updated = directory.find(&id).cloned();
            output(&updated.unwrap_or_else(|| placeholder(&draft)), flags.format)
        }
        UserCommands::Delete { user } => {
            directory.refresh(&ctx.client).await?;
            let id = find(&directory, user)?.id.clone();
            directory.delete(&ctx.client, &id).await?;
            output(
                &DeleteResponse {
                    deleted: id,
                    remaining: directory.users().len(),
                },
                flags.format,
            )
        }
    }
}

fn find<'a>(directory: &'a UserDirectory, key: &str) -> anyhow::Result<&'a UserRecord> {
    directory
        .find(key)
        .with_context(|| format!("no user with id or username '{key}'"))
}

fn placeholder(draft: &UserDraft) -> UserRecord {
    UserRecord {
        id: String::new(),
        username: draft.username.clone(),
        role: draft.role,
        status: draft.status,
    }
}
