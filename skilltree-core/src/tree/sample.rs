// Built-in "life goals" tree, used when the page has no source of its own.

use crate::tree::types::{Direction, Node, SkillTree};

/// A progression: each step is the only child of the step before it.
fn chain(labels: &[&str]) -> Vec<Node> {
    labels
        .iter()
        .rev()
        .fold(Vec::new(), |next, label| vec![Node::new(*label).with_children(next)])
}

pub fn life_goals() -> SkillTree {
    let health = Node::new("Health")
        .with_glyph("🏋️‍♂️")
        .with_direction(Direction::Right)
        .with_children(vec![
            Node::new("Road to Marathon Glory 🏃")
                .with_children(chain(&["Run 1km", "Run 10km", "Run 21km", "Run 42km"])),
            Node::new("Bodyweight Mastery 💪").with_children(vec![
                Node::new("Push-ups 👊")
                    .with_children(chain(&["Do 10 push ups", "Do 100 push ups in a day"])),
                Node::new("Bar Mastery 🏋️")
                    .with_children(chain(&["Do 1 pullup", "Do 10 pullups", "Do a muscle up"])),
            ]),
        ]);

    let wealth = Node::new("Wealth")
        .with_glyph("💰")
        .with_direction(Direction::Top)
        .with_children(vec![Node::new("Financial Foundations 🏠").with_children(chain(&[
            "$1",
            "$100",
            "$1,000",
            "$10,000",
            "$100,000",
            "$1,000,000",
            "$10,000,000",
            "$100,000,000",
            "$1,000,000,000",
        ]))]);

    let wisdom = Node::new("Wisdom")
        .with_glyph("📚")
        .with_direction(Direction::Left)
        .with_children(vec![
            Node::new("Reading Odyssey 📖").with_children(chain(&[
                "Read 1 book",
                "Read 100 books",
                "Read 500 books",
                "Read 1,000 books",
            ])),
            Node::new("Author's Journey ✍️").with_children(chain(&["Write 1 book", "Write 5 books"])),
            Node::new("Blogging 💻").with_children(chain(&[
                "Write 1 blog post",
                "Write 10 blog posts",
                "Write 50 blog posts",
                "Write 100 blog posts",
            ])),
        ]);

    let explore = Node::new("Explore")
        .with_glyph("🌍")
        .with_direction(Direction::Bottom)
        .with_children(vec![
            Node::new("Continental Conqueror 🗺️").with_children(chain(&[
                "Visit 2 continents",
                "Visit 4 continents",
                "Visit all 7 continents",
            ])),
            Node::new("Global Adventurer 🧭").with_children(chain(&[
                "Visit 4 countries",
                "Visit 10 countries",
                "Visit 20 countries",
                "Visit 40 countries",
                "Visit 100 countries",
            ])),
            Node::new("Career 💼").with_children(chain(&[
                "Get an internship",
                "Get a full-time job",
                "Get a promotion",
                "Lead a project",
                "Become a manager",
                "Start a company",
                "Give a keynote speech",
            ])),
            Node::new("Go-offline 🌴").with_children(chain(&[
                "Take 1 tech-free day",
                "Take 2 tech-free days",
                "Take 7 tech-free days",
            ])),
        ]);

    SkillTree::new(Node::new("Start").with_children(vec![health, wealth, wisdom, explore]))
}
