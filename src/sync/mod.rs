use tracing::{debug, error};

use crate::api::{deck, trello, SourceStack, TargetList};
use crate::config::SyncGroup;


/// Run one reconciliation pass for a sync group: fetch both card lists fresh,
/// then make the Trello list match the Deck stack. Errors are logged and end
/// the pass; the next scheduled tick retries from scratch.
pub async fn run_group(group: &SyncGroup, source: &dyn SourceStack, target: &dyn TargetList) {
    let source_cards = match source
        .cards(group.nextcloud.board, group.nextcloud.stack)
        .await
    {
        Ok(cards) => cards,
        Err(err) => {
            error!(group = %group.name, %err, "failed to fetch deck cards");
            return;
        }
    };

    let target_cards = match target.cards(&group.trello.list).await {
        Ok(cards) => cards,
        Err(err) => {
            error!(group = %group.name, %err, "failed to fetch trello cards");
            return;
        }
    };

    reconcile(group, &source_cards, &target_cards, target).await;
}

/// One-directional diff keyed on exact title equality. When titles repeat, the
/// first match in fetch order wins and the rest are left alone. A failed
/// mutation ends the whole pass, including the delete loop; partially applied
/// changes converge on a later tick.
async fn reconcile(
    group: &SyncGroup,
    source_cards: &[deck::Card],
    target_cards: &[trello::Card],
    target: &dyn TargetList,
) {
    for card in source_cards {
        let description = card.description.as_deref().unwrap_or_default();
        match target_cards.iter().find(|t| t.name == card.title) {
            None => {
                match target
                    .create(&group.trello.list, &card.title, description, &[])
                    .await
                {
                    Ok(created) => {
                        debug!(group = %group.name, card = %created.name, "created trello card");
                    }
                    Err(err) => {
                        error!(group = %group.name, card = %card.title, %err, "failed to create trello card");
                        return;
                    }
                }
            }
            Some(existing) if existing.desc != description => {
                // Only the description is synchronized; the target card keeps
                // its own title casing and labels.
                match target
                    .update(&existing.id, &existing.name, description, &existing.id_labels)
                    .await
                {
                    Ok(_) => {
                        debug!(group = %group.name, card = %existing.name, "updated trello card");
                    }
                    Err(err) => {
                        error!(group = %group.name, card = %existing.name, %err, "failed to update trello card");
                        return;
                    }
                }
            }
            Some(_) => {}
        }
    }

    for card in target_cards {
        if source_cards.iter().any(|s| s.title == card.name) {
            continue;
        }
        match target.delete(&card.id).await {
            Ok(()) => {
                debug!(group = %group.name, card = %card.name, "deleted stale trello card");
            }
            Err(err) => {
                error!(group = %group.name, card = %card.name, %err, "failed to delete trello card");
                return;
            }
        }
    }
}
