//! Wedding party roster page.

use std::collections::BTreeMap;

use crate::i18n::{fill, Language};
use crate::models::{PartySide, Wedding, WeddingPartyMember};
use crate::translation::TranslationClient;

/// Translation domain for party member bios.
pub const TRANSLATION_DOMAIN: &str = "wedding-party";

#[derive(Debug, Clone)]
pub struct PartyMemberView {
    pub name: String,
    pub initials: String,
    pub role: String,
    pub photo_url: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PartyGroupView {
    pub side: PartySide,
    pub label: String,
    pub members: Vec<PartyMemberView>,
}

#[derive(Debug, Clone)]
pub struct PartyView {
    pub wedding_id: String,
    pub title: String,
    pub couple_names: String,
    pub empty_message: Option<String>,
    pub groups: Vec<PartyGroupView>,
}

/// Members grouped by side (bride, groom, couple), each group ordered by
/// display order and then by name. Sides without members are left out.
pub fn group_by_side(
    members: &[WeddingPartyMember],
) -> Vec<(PartySide, Vec<&WeddingPartyMember>)> {
    let mut groups: BTreeMap<PartySide, Vec<&WeddingPartyMember>> = BTreeMap::new();
    for member in members {
        groups.entry(member.side).or_default().push(member);
    }
    groups
        .into_iter()
        .map(|(side, mut members)| {
            members.sort_by(|a, b| {
                a.display_order
                    .cmp(&b.display_order)
                    .then_with(|| a.name.cmp(&b.name))
            });
            (side, members)
        })
        .collect()
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Build the roster page, translating bios into `language`. A bio that
/// fails to translate is shown as written.
pub async fn compose(
    wedding: &Wedding,
    members: &[WeddingPartyMember],
    language: Language,
    client: &TranslationClient,
) -> PartyView {
    let strings = language.strings();
    let content_language = wedding.settings.content_language;
    let options = client
        .options(language)
        .with_source(content_language)
        .with_domain(TRANSLATION_DOMAIN);

    let mut groups = Vec::new();
    for (side, side_members) in group_by_side(members) {
        let mut views = Vec::with_capacity(side_members.len());
        for member in side_members {
            let bio = match member.bio.as_deref().map(str::trim) {
                Some(bio) if !bio.is_empty() => {
                    if content_language == Some(language) {
                        Some(bio.to_string())
                    } else {
                        Some(client.translate_or_original(bio, &options).await)
                    }
                }
                _ => None,
            };
            views.push(PartyMemberView {
                name: member.name.clone(),
                initials: initials(&member.name),
                role: member.role.label(strings).to_string(),
                photo_url: member.photo_url.clone(),
                bio,
            });
        }
        groups.push(PartyGroupView {
            side,
            label: side.label(strings).to_string(),
            members: views,
        });
    }

    PartyView {
        wedding_id: wedding.id.clone(),
        title: strings.party_title.to_string(),
        couple_names: fill(
            strings.page_title,
            &[("one", &wedding.partner_one), ("two", &wedding.partner_two)],
        ),
        empty_message: groups.is_empty().then(|| strings.party_empty.to_string()),
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PartyRole, WeddingSettings};
    use crate::storage::MemoryStore;
    use crate::translator::{DisabledTranslator, RemoteTranslator, TranslateError, TranslateRequest};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn member(name: &str, role: PartyRole, side: PartySide, order: i32) -> WeddingPartyMember {
        WeddingPartyMember {
            id: format!("m-{}", name),
            wedding_id: "w1".to_string(),
            name: name.to_string(),
            role,
            side,
            display_order: order,
            photo_url: None,
            bio: None,
        }
    }

    fn wedding() -> Wedding {
        Wedding {
            id: "w1".to_string(),
            subdomain: None,
            partner_one: "Ana".to_string(),
            partner_two: "Luis".to_string(),
            wedding_date: Utc.with_ymd_and_hms(2027, 5, 1, 22, 0, 0).unwrap(),
            settings: WeddingSettings::default(),
        }
    }

    struct EchoTranslator;

    #[async_trait]
    impl RemoteTranslator for EchoTranslator {
        async fn translate(&self, request: &TranslateRequest) -> Result<String, TranslateError> {
            Ok(format!("{} ({})", request.text, request.target.code()))
        }
    }

    fn client(remote: Arc<dyn RemoteTranslator>) -> TranslationClient {
        TranslationClient::new(remote, Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_group_by_side_orders_sides_and_members() {
        let members = vec![
            member("Zoe", PartyRole::Bridesmaid, PartySide::Bride, 2),
            member("Pedro", PartyRole::Officiant, PartySide::Couple, 0),
            member("Marco", PartyRole::BestMan, PartySide::Groom, 1),
            member("Bea", PartyRole::Bridesmaid, PartySide::Bride, 2),
            member("Lia", PartyRole::MaidOfHonor, PartySide::Bride, 1),
        ];

        let groups = group_by_side(&members);

        let sides: Vec<_> = groups.iter().map(|(side, _)| *side).collect();
        assert_eq!(sides, vec![PartySide::Bride, PartySide::Groom, PartySide::Couple]);
        let bride: Vec<_> = groups[0].1.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(bride, vec!["Lia", "Bea", "Zoe"]);
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("maría josé lópez"), "MJ");
        assert_eq!(initials("Pedro"), "P");
        assert_eq!(initials(""), "");
    }

    #[tokio::test]
    async fn test_empty_roster_shows_message() {
        let view = compose(
            &wedding(),
            &[],
            Language::SPANISH,
            &client(Arc::new(DisabledTranslator)),
        )
        .await;
        assert!(view.groups.is_empty());
        assert_eq!(view.empty_message.as_deref(), Some(Language::SPANISH.strings().party_empty));
    }

    #[tokio::test]
    async fn test_roles_and_sides_are_localized() {
        let members = vec![member("Rosa y Jorge", PartyRole::PadrinosLazo, PartySide::Couple, 0)];
        let view = compose(
            &wedding(),
            &members,
            Language::ENGLISH,
            &client(Arc::new(DisabledTranslator)),
        )
        .await;

        let group = &view.groups[0];
        assert_eq!(group.label, Language::ENGLISH.strings().side_couple);
        assert_eq!(group.members[0].role, Language::ENGLISH.strings().role_padrinos_lazo);
    }

    #[tokio::test]
    async fn test_bios_translated_with_fallback() {
        let mut with_bio = member("Marco", PartyRole::BestMan, PartySide::Groom, 0);
        with_bio.bio = Some("Amigo desde la infancia".to_string());
        let members = vec![with_bio];

        let translated = compose(
            &wedding(),
            &members,
            Language::ENGLISH,
            &client(Arc::new(EchoTranslator)),
        )
        .await;
        assert_eq!(
            translated.groups[0].members[0].bio.as_deref(),
            Some("Amigo desde la infancia (en)")
        );

        let fallback = compose(
            &wedding(),
            &members,
            Language::ENGLISH,
            &client(Arc::new(DisabledTranslator)),
        )
        .await;
        assert_eq!(
            fallback.groups[0].members[0].bio.as_deref(),
            Some("Amigo desde la infancia")
        );
    }

    #[tokio::test]
    async fn test_bio_in_content_language_is_not_sent() {
        let mut w = wedding();
        w.settings.content_language = Some(Language::ENGLISH);
        let mut with_bio = member("Marco", PartyRole::BestMan, PartySide::Groom, 0);
        with_bio.bio = Some("Childhood friend".to_string());

        let view = compose(
            &w,
            &[with_bio],
            Language::ENGLISH,
            &client(Arc::new(EchoTranslator)),
        )
        .await;

        assert_eq!(view.groups[0].members[0].bio.as_deref(), Some("Childhood friend"));
    }
}
