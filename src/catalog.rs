//! The development environments and frameworks an app can be scaffolded with.

use crate::prompt::SelectOption;

/// How an app is bootstrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevEnv {
    Vite,
    /// A bare `npm init` package with an `index.js` entry.
    None,
}

impl DevEnv {
    pub const SUPPORTED: &'static [&'static str] = &["vite", "none"];

    /// Parse a `--env` value or a `(vite)` folder suffix.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "vite" => Some(Self::Vite),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// The supported value closest to `value`, for "did you mean" hints.
    pub fn suggest(value: &str) -> Option<&'static str> {
        Self::SUPPORTED
            .iter()
            .copied()
            .map(|candidate| (candidate, strsim::jaro_winkler(value, candidate)))
            .filter(|(_, score)| *score > 0.7)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(candidate, _)| candidate)
    }

    pub fn options() -> Vec<SelectOption<DevEnv>> {
        vec![
            SelectOption::new("Vite", DevEnv::Vite)
                .with_description("Use vite development environment to build your app."),
            SelectOption::new("None", DevEnv::None)
                .with_description("Don't use any development environment."),
        ]
    }
}

/// A framework template offered by create-vite.
#[derive(Debug, Clone)]
pub struct Framework {
    pub name: &'static str,
    pub value: &'static str,
    pub variants: &'static [Variant],
}

/// A language flavour of a framework template. An empty suffix is plain JavaScript.
#[derive(Debug, Clone, Copy)]
pub struct Variant {
    pub name: &'static str,
    pub suffix: &'static str,
}

const TS: Variant = Variant {
    name: "Typescript",
    suffix: "ts",
};
const JS: Variant = Variant {
    name: "Javascript",
    suffix: "",
};

pub const FRAMEWORKS: &[Framework] = &[
    Framework {
        name: "Vue",
        value: "vue",
        variants: &[TS, JS],
    },
    Framework {
        name: "React",
        value: "react",
        variants: &[
            TS,
            Variant {
                name: "Typescript with SWC",
                suffix: "swc-ts",
            },
            JS,
            Variant {
                name: "Javascript with SWC",
                suffix: "swc",
            },
        ],
    },
    Framework {
        name: "Preact",
        value: "preact",
        variants: &[TS, JS],
    },
    Framework {
        name: "Lit",
        value: "lit",
        variants: &[TS, JS],
    },
    Framework {
        name: "Svelte",
        value: "svelte",
        variants: &[TS, JS],
    },
    Framework {
        name: "Qwik",
        value: "qwik",
        variants: &[TS, JS],
    },
];

impl Framework {
    pub fn options(app: &str) -> Vec<SelectOption<&'static Framework>> {
        FRAMEWORKS
            .iter()
            .map(|f| {
                SelectOption::new(f.name, f).with_description(format!("Build {app} using {}", f.name))
            })
            .collect()
    }

    pub fn variant_options(&self) -> Vec<SelectOption<Variant>> {
        self.variants
            .iter()
            .map(|v| {
                let language = if v.name.starts_with("Typescript") {
                    "typescript"
                } else {
                    "javascript"
                };
                SelectOption::new(v.name, *v).with_description(format!("Build to use {language}"))
            })
            .collect()
    }

    /// The create-vite `--template` name, e.g. `react-swc-ts` or `vue`.
    pub fn template(&self, variant: Variant) -> String {
        if variant.suffix.is_empty() {
            self.value.to_string()
        } else {
            format!("{}-{}", self.value, variant.suffix)
        }
    }
}
