//! Static landing content shown around the request form.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hero {
    pub headline: &'static str,
    pub highlight: &'static str,
    pub tagline: &'static str,
    pub placeholder: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brand {
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// A titled card in the about section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoCard {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AboutSection {
    pub title: &'static str,
    pub paragraphs: &'static [&'static str],
    pub infos: &'static [InfoCard],
}

pub const HERO: Hero = Hero {
    headline: "Instantly Generate",
    highlight: "Dependency List",
    tagline: "Simplify Python dependency management with AutoReqPy. \
              Just provide a repo link, and we'll handle the rest.",
    placeholder: "https://github.com/username/repo.git",
};

/// Services the generator is integrated with, in display order.
pub const BRANDS: &[Brand] = &[
    Brand { name: "Python" },
    Brand { name: "Gemini" },
    Brand { name: "GitHub" },
];

pub const SERVICES: &[Service] = &[
    Service {
        title: "Code-Based Parsing",
        description: "Statically analyze your Python code to extract actual imports and used \
                      libraries, no more guesswork.",
        icon: "≡",
    },
    Service {
        title: "AI-Powered Verification",
        description: "Verify extracted dependencies with AI to ensure accuracy, compatibility, \
                      and remove false positives.",
        icon: "✓",
    },
    Service {
        title: "Unused Library Cleanup",
        description: "Automatically detect and help you remove libraries that are installed but \
                      never used in code.",
        icon: "✗",
    },
];

pub const ABOUT: AboutSection = AboutSection {
    title: "About AutoPyReq",
    paragraphs: &["AutoPyReq solves one of the biggest headaches for Python developers — managing \
                   dependencies when requirements.txt is missing or outdated. We use smart code \
                   parsing and AI verification to generate a clean, accurate dependency list \
                   with ease."],
    infos: &[
        InfoCard {
            title: "Mission",
            description: "Make Python projects reproducible and dependency-safe using \
                          intelligent automation.",
        },
        InfoCard {
            title: "Vision",
            description: "Empower devs to clean up their codebase and ship projects with \
                          complete, minimal dependencies.",
        },
    ],
};
