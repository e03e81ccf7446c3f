/// Static marketing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketingPage {
    pub title: &'static str,
    pub tagline: &'static str,
    pub sections: &'static [(&'static str, &'static str)],
}

impl MarketingPage {
    pub fn home() -> Self {
        Self {
            title: "Revive Fitness",
            tagline: "Train hard. Recover smart. Come back stronger.",
            sections: &[
                (
                    "Programs",
                    "Strength, conditioning, yoga and more, coached by certified trainers.",
                ),
                (
                    "Current Challenge",
                    "Join this month's challenge and track your progress with the community.",
                ),
                (
                    "Membership",
                    "Log in to see your attendance calendar and manage your programs.",
                ),
            ],
        }
    }

    pub fn about() -> Self {
        Self {
            title: "About Revive Fitness",
            tagline: "A neighbourhood gym built around people, not machines.",
            sections: &[
                (
                    "Our Mission",
                    "Help every member build a routine they enjoy and can keep for life.",
                ),
                (
                    "Our Trainers",
                    "Experienced coaches who plan programs around your goals and schedule.",
                ),
                (
                    "Our Space",
                    "Open floor, free weights, a functional zone and a recovery corner.",
                ),
            ],
        }
    }
}
