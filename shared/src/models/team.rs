//! Team registry

use super::row::{Row, RowExt};
use crate::util::first_name;
use serde::{Deserialize, Serialize};

const GROUP: &[&str] = &["group", "groupname"];
const TEAM_NAME: &[&str] = &["productservicename", "teamname", "productname"];
const ACCOUNT_ID: &[&str] = &["accountid", "razorpayaccountid"];
const ACCOUNT_EMAIL: &[&str] = &["accountemail", "razorpayaccountemail"];
const MEMBER_NAMES: [&[&str]; 5] = [&["name1"], &["name2"], &["name3"], &["name4"], &["name5"]];

/// One competing team, keyed by its payment gateway account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Join key against payment events; empty when the sheet leaves it blank
    pub account_id: String,
    pub account_email: Option<String>,
    pub team_name: String,
    pub group_label: String,
    /// First names of up to five members, in sheet order
    pub member_first_names: Vec<String>,
}

impl Team {
    /// Build a team from a registry row. Rows without a group or a team
    /// name are padding in the sheet and yield `None`.
    pub fn from_row(row: &Row) -> Option<Self> {
        let group_label = row.field(GROUP)?;
        let team_name = row.field(TEAM_NAME)?;

        let member_first_names = MEMBER_NAMES
            .iter()
            .filter_map(|aliases| row.field(aliases))
            .map(|full| first_name(&full).to_string())
            .filter(|name| !name.is_empty())
            .collect();

        Some(Self {
            account_id: row.field(ACCOUNT_ID).unwrap_or_default(),
            account_email: row.field(ACCOUNT_EMAIL),
            team_name,
            group_label,
            member_first_names,
        })
    }
}

/// Ordered, read-only team registry for one sync cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamRegistry {
    teams: Vec<Team>,
}

impl TeamRegistry {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// First team in registry order owning `account_id`
    pub fn find_by_account(&self, account_id: &str) -> Option<&Team> {
        if account_id.is_empty() {
            return None;
        }
        self.teams.iter().find(|t| t.account_id == account_id)
    }

    /// Feed join: a team matches on account email OR account id
    pub fn find_for_feed(&self, email: Option<&str>, account_id: Option<&str>) -> Option<&Team> {
        self.teams.iter().find(|t| {
            let email_match = matches!(
                (email, t.account_email.as_deref()),
                (Some(a), Some(b)) if a == b
            );
            let id_match = matches!(account_id, Some(id) if !id.is_empty() && id == t.account_id);
            email_match || id_match
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn team(account_id: &str, email: Option<&str>, name: &str) -> Team {
        Team {
            account_id: account_id.into(),
            account_email: email.map(Into::into),
            team_name: name.into(),
            group_label: "G1".into(),
            member_first_names: vec![],
        }
    }

    #[test]
    fn test_from_row() {
        let row = json!({
            "Group": "Group A",
            "Product/Service Name": "Chai Co",
            "Name1": "Asha Rao",
            "Email1": "asha@x.com",
            "Name2": "",
            "Name3": "Vikram  Singh",
            "Account ID": "acc_1",
            "Account Email": "chai@x.com",
        });
        let team = Team::from_row(row.as_object().unwrap()).unwrap();
        assert_eq!(team.group_label, "Group A");
        assert_eq!(team.team_name, "Chai Co");
        assert_eq!(team.account_id, "acc_1");
        assert_eq!(team.account_email.as_deref(), Some("chai@x.com"));
        assert_eq!(team.member_first_names, vec!["Asha", "Vikram"]);
    }

    #[test]
    fn test_from_row_requires_group_and_name() {
        let row = json!({ "Group": "", "Product/Service Name": "Chai Co" });
        assert!(Team::from_row(row.as_object().unwrap()).is_none());

        let row = json!({ "Group": "A" });
        assert!(Team::from_row(row.as_object().unwrap()).is_none());
    }

    #[test]
    fn test_find_by_account_ignores_blank_ids() {
        let registry = TeamRegistry::new(vec![team("", None, "Blank"), team("acc_1", None, "One")]);
        assert!(registry.find_by_account("").is_none());
        assert_eq!(registry.find_by_account("acc_1").unwrap().team_name, "One");
    }

    #[test]
    fn test_find_for_feed_matches_email_or_id() {
        let registry = TeamRegistry::new(vec![
            team("acc_1", Some("one@x.com"), "One"),
            team("acc_2", Some("two@x.com"), "Two"),
        ]);
        assert_eq!(
            registry.find_for_feed(Some("two@x.com"), None).unwrap().team_name,
            "Two"
        );
        assert_eq!(
            registry.find_for_feed(Some("nobody@x.com"), Some("acc_1")).unwrap().team_name,
            "One"
        );
        assert!(registry.find_for_feed(None, None).is_none());
    }
}
