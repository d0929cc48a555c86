//! The fixed set of creative personas a question can be addressed to.
//!
//! Roles are a closed enum, so every role handed out by [`Role::ALL`] can be
//! described without an error path.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    VideoDirector,
    DanceInstructor,
    FashionStylist,
    ActingCoach,
    ArtCurator,
}

/// Prompt text registered for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleProfile {
    /// System prompt sent ahead of the user's question.
    pub description: &'static str,
    /// Placeholder question shown in the question field.
    pub example: &'static str,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown role '{0}', expected one of: {names}", names = Role::names().join(", "))]
pub struct UnknownRole(pub String);

impl Role {
    /// Every role, in display order.
    pub const ALL: [Role; 5] = [
        Role::VideoDirector,
        Role::DanceInstructor,
        Role::FashionStylist,
        Role::ActingCoach,
        Role::ArtCurator,
    ];

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Role::name).collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::VideoDirector => "Video Director",
            Role::DanceInstructor => "Dance Instructor",
            Role::FashionStylist => "Fashion Stylist",
            Role::ActingCoach => "Acting Coach",
            Role::ArtCurator => "Art Curator",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Role> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.name().eq_ignore_ascii_case(name))
    }

    pub fn describe(&self) -> RoleProfile {
        match self {
            Role::VideoDirector => RoleProfile {
                description: "You are a professional film director. Always analyze ideas in terms of visual storytelling — use camera movement, lighting, framing, and emotional tone to explain your thoughts. Describe concepts as if you are planning a film scene.",
                example: "How can I shoot a dream sequence?",
            },
            Role::DanceInstructor => RoleProfile {
                description: "You are an experienced dance instructor. Focus on movement, rhythm, body expression, and emotional conveyance through dance. Provide practical advice on techniques and artistic expression.",
                example: "How can I express sadness through movement?",
            },
            Role::FashionStylist => RoleProfile {
                description: "You are a professional fashion stylist. Discuss color trends, materials, silhouettes, and personal style. Consider body types, occasions, and personality when giving advice.",
                example: "What style fits a confident personality?",
            },
            Role::ActingCoach => RoleProfile {
                description: "You are a seasoned acting coach. Teach emotion delivery, scene breakdown, character development, and natural expression. Focus on authenticity and technique.",
                example: "How to express fear naturally on stage?",
            },
            Role::ArtCurator => RoleProfile {
                description: "You are an art curator with deep knowledge of art history and interpretation. Analyze artworks, compositions, emotional impact, and connect artistic choices with broader contexts.",
                example: "How does this composition convey emotion?",
            },
        }
    }

    /// One-line summary for the help panel.
    pub fn summary(&self) -> &'static str {
        match self {
            Role::VideoDirector => "Film and video production expertise",
            Role::DanceInstructor => "Movement and expression guidance",
            Role::FashionStylist => "Style and trend advice",
            Role::ActingCoach => "Performance and emotion techniques",
            Role::ArtCurator => "Art interpretation and analysis",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Role::VideoDirector => "🎬",
            Role::DanceInstructor => "💃",
            Role::FashionStylist => "👗",
            Role::ActingCoach => "🎭",
            Role::ArtCurator => "🖼️",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::ALL[0]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_name(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_role_has_description_and_example() {
        for role in Role::ALL {
            let profile = role.describe();
            assert!(!profile.description.is_empty(), "{role} has no description");
            assert!(!profile.example.is_empty(), "{role} has no example");
            assert!(!role.summary().is_empty());
        }
    }

    #[test]
    fn names_are_unique_and_ordered() {
        let names = Role::names();
        assert_eq!(
            names,
            vec![
                "Video Director",
                "Dance Instructor",
                "Fashion Stylist",
                "Acting Coach",
                "Art Curator",
            ]
        );
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn every_listed_name_resolves_back_to_its_role() {
        for role in Role::ALL {
            assert_eq!(Role::from_name(role.name()), Some(role));
        }
    }

    #[test]
    fn parsing_is_case_insensitive_and_rejects_unknown_names() {
        assert_eq!("art curator".parse::<Role>(), Ok(Role::ArtCurator));
        assert_eq!("  Acting Coach ".parse::<Role>(), Ok(Role::ActingCoach));

        let err = "Chef".parse::<Role>().unwrap_err();
        assert_eq!(err, UnknownRole("Chef".to_string()));
        assert!(err.to_string().contains("Video Director"));
    }

    #[test]
    fn video_director_prompt_matches_registered_text() {
        let profile = Role::VideoDirector.describe();
        assert!(profile.description.starts_with("You are a professional film director."));
        assert_eq!(profile.example, "How can I shoot a dream sequence?");
    }
}
