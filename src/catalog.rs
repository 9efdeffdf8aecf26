/// Static remix catalog
///
/// The catalog is fixed for a session: a list of stacks (browsable
/// categories) and the templates inside them. Everything is `const` data
/// referenced by `&'static` handles, so selections can be passed around
/// in messages without cloning strings.

/// A named category grouping related templates, shown as a browsable tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stack {
    pub id: &'static str,
    pub name: &'static str,
    pub image_url: &'static str,
}

/// A single remix recipe: reference image, generation prompt, and target
/// aspect ratio. `stack_id` always names an existing [`Stack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub stack_id: &'static str,
    pub image_url: &'static str,
    pub prompt: &'static str,
    pub aspect_ratio: AspectRatio,
}

/// Target aspect ratio of a template's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Square,
    Landscape,
    Portrait,
    Wide,
    Tall,
}

impl AspectRatio {
    /// Display label, e.g. "3:4".
    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "4:3",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Wide => "16:9",
            AspectRatio::Tall => "9:16",
        }
    }

    /// Width divided by height.
    pub fn ratio(self) -> f32 {
        match self {
            AspectRatio::Square => 1.0,
            AspectRatio::Landscape => 4.0 / 3.0,
            AspectRatio::Portrait => 3.0 / 4.0,
            AspectRatio::Wide => 16.0 / 9.0,
            AspectRatio::Tall => 9.0 / 16.0,
        }
    }
}

const STACKS: &[Stack] = &[
    Stack {
        id: "cinematic-portraits",
        name: "Cinematic Portraits",
        image_url: "assets/stacks/cinematic-portraits.jpg",
    },
    Stack {
        id: "retro-posters",
        name: "Retro Posters",
        image_url: "assets/stacks/retro-posters.jpg",
    },
    Stack {
        id: "brand-campaigns",
        name: "Brand Campaigns",
        image_url: "assets/stacks/brand-campaigns.jpg",
    },
    Stack {
        id: "creator-thumbnails",
        name: "Creator Thumbnails",
        image_url: "assets/stacks/creator-thumbnails.jpg",
    },
    Stack {
        id: "painted-styles",
        name: "Painted Styles",
        image_url: "assets/stacks/painted-styles.jpg",
    },
    Stack {
        id: "future-worlds",
        name: "Future Worlds",
        image_url: "assets/stacks/future-worlds.jpg",
    },
];

const TEMPLATES: &[Template] = &[
    Template {
        id: "noir-detective",
        name: "Noir Detective",
        stack_id: "cinematic-portraits",
        image_url: "assets/templates/noir-detective.jpg",
        prompt: "A moody black-and-white film noir scene. {input person} wears a trench coat and fedora, lit by a single venetian-blind shadow, heavy grain, 1940s cinematography.",
        aspect_ratio: AspectRatio::Portrait,
    },
    Template {
        id: "golden-hour",
        name: "Golden Hour Close-up",
        stack_id: "cinematic-portraits",
        image_url: "assets/templates/golden-hour.jpg",
        prompt: "A warm golden-hour close-up of {input person}, shallow depth of field, anamorphic lens flare, 35mm film color grade.",
        aspect_ratio: AspectRatio::Wide,
    },
    Template {
        id: "rain-window",
        name: "Rainy Window",
        stack_id: "cinematic-portraits",
        image_url: "assets/templates/rain-window.jpg",
        prompt: "{input person} gazes through a rain-streaked window at neon city lights, reflective teal and magenta palette, melancholic cinematic mood.",
        aspect_ratio: AspectRatio::Portrait,
    },
    Template {
        id: "seventies-vinyl",
        name: "70s Vinyl Cover",
        stack_id: "retro-posters",
        image_url: "assets/templates/seventies-vinyl.jpg",
        prompt: "A 1970s psychedelic vinyl record cover featuring {input person}, bold groovy typography, sunburst gradients, slightly worn cardboard texture.",
        aspect_ratio: AspectRatio::Square,
    },
    Template {
        id: "propaganda-print",
        name: "Vintage Travel Print",
        stack_id: "retro-posters",
        image_url: "assets/templates/propaganda-print.jpg",
        prompt: "A mid-century travel poster with {input person} as the central figure, flat screen-print colors, halftone shading, art deco border.",
        aspect_ratio: AspectRatio::Tall,
    },
    Template {
        id: "arcade-flyer",
        name: "80s Arcade Flyer",
        stack_id: "retro-posters",
        image_url: "assets/templates/arcade-flyer.jpg",
        prompt: "An 80s arcade cabinet flyer starring {input person} as the hero, chrome lettering, laser grid horizon, airbrushed neon art.",
        aspect_ratio: AspectRatio::Portrait,
    },
    Template {
        id: "billboard-hero",
        name: "Billboard Hero Shot",
        stack_id: "brand-campaigns",
        image_url: "assets/templates/billboard-hero.jpg",
        prompt: "A premium outdoor billboard advertisement: {input person} in crisp studio lighting against a clean gradient, generous negative space for copy, high-end retouching.",
        aspect_ratio: AspectRatio::Wide,
    },
    Template {
        id: "product-duo",
        name: "Lifestyle Product Shot",
        stack_id: "brand-campaigns",
        image_url: "assets/templates/product-duo.jpg",
        prompt: "A bright lifestyle campaign photo of {input person} holding a product, soft daylight studio, pastel seamless backdrop, editorial composition.",
        aspect_ratio: AspectRatio::Landscape,
    },
    Template {
        id: "street-takeover",
        name: "Street Takeover",
        stack_id: "brand-campaigns",
        image_url: "assets/templates/street-takeover.jpg",
        prompt: "{input person} mid-stride on a city crosswalk surrounded by floating brand graphics, dynamic motion blur, bold urban campaign style.",
        aspect_ratio: AspectRatio::Portrait,
    },
    Template {
        id: "reaction-thumb",
        name: "Reaction Thumbnail",
        stack_id: "creator-thumbnails",
        image_url: "assets/templates/reaction-thumb.jpg",
        prompt: "A high-energy video thumbnail: {input person} with an exaggerated surprised expression, saturated colors, thick white cutout outline, explosive background.",
        aspect_ratio: AspectRatio::Wide,
    },
    Template {
        id: "versus-split",
        name: "Versus Split",
        stack_id: "creator-thumbnails",
        image_url: "assets/templates/versus-split.jpg",
        prompt: "A split-screen versus thumbnail with {input person} on the left facing a lightning bolt divider, dramatic rim lighting, bold red and blue halves.",
        aspect_ratio: AspectRatio::Wide,
    },
    Template {
        id: "oil-master",
        name: "Oil Master",
        stack_id: "painted-styles",
        image_url: "assets/templates/oil-master.jpg",
        prompt: "A classical oil painting of {input person} in the style of the Dutch masters, chiaroscuro lighting, visible brushwork, ornate gilded frame.",
        aspect_ratio: AspectRatio::Portrait,
    },
    Template {
        id: "ink-wash",
        name: "Ink Wash",
        stack_id: "painted-styles",
        image_url: "assets/templates/ink-wash.jpg",
        prompt: "A minimal East Asian ink wash painting of {input person}, loose expressive strokes, rice paper texture, a single red seal stamp.",
        aspect_ratio: AspectRatio::Tall,
    },
    Template {
        id: "neon-runner",
        name: "Neon Runner",
        stack_id: "future-worlds",
        image_url: "assets/templates/neon-runner.jpg",
        prompt: "{input person} as a cyberpunk courier on a rain-slick rooftop, holographic advertisements overhead, cinematic sci-fi concept art.",
        aspect_ratio: AspectRatio::Wide,
    },
    Template {
        id: "orbit-station",
        name: "Orbit Station",
        stack_id: "future-worlds",
        image_url: "assets/templates/orbit-station.jpg",
        prompt: "{input person} in a sleek flight suit aboard an orbital station, Earth filling the panoramic window, clean NASA-punk aesthetic.",
        aspect_ratio: AspectRatio::Landscape,
    },
];

/// How many templates the home page carousel features.
const TRENDING_COUNT: usize = 8;

/// All stacks, in display order.
pub fn stacks() -> &'static [Stack] {
    STACKS
}

/// All templates, in display order.
pub fn templates() -> &'static [Template] {
    TEMPLATES
}

/// Templates belonging to one stack, preserving catalog order.
pub fn templates_in(stack_id: &str) -> impl Iterator<Item = &'static Template> + '_ {
    TEMPLATES.iter().filter(move |t| t.stack_id == stack_id)
}

/// The templates featured in the home page carousel.
pub fn trending() -> &'static [Template] {
    &TEMPLATES[..TRENDING_COUNT.min(TEMPLATES.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let stack_ids: HashSet<_> = stacks().iter().map(|s| s.id).collect();
        assert_eq!(stack_ids.len(), stacks().len());

        let template_ids: HashSet<_> = templates().iter().map(|t| t.id).collect();
        assert_eq!(template_ids.len(), templates().len());
    }

    #[test]
    fn test_every_template_references_an_existing_stack() {
        for template in templates() {
            assert!(
                stacks().iter().any(|s| s.id == template.stack_id),
                "template {} points at unknown stack {}",
                template.id,
                template.stack_id
            );
        }
    }

    #[test]
    fn test_every_stack_has_templates() {
        for stack in stacks() {
            assert!(
                templates_in(stack.id).count() > 0,
                "stack {} has no templates",
                stack.id
            );
        }
    }

    #[test]
    fn test_prompts_are_non_empty() {
        for template in templates() {
            assert!(!template.prompt.trim().is_empty());
        }
    }

    #[test]
    fn test_trending_is_a_prefix_of_the_catalog() {
        let featured = trending();
        assert_eq!(featured.len(), 8);
        assert_eq!(featured, &templates()[..8]);
    }

    #[test]
    fn test_aspect_ratio_labels_match_ratios() {
        assert_eq!(AspectRatio::Square.label(), "1:1");
        assert!((AspectRatio::Portrait.ratio() - 0.75).abs() < f32::EPSILON);
        assert!(AspectRatio::Wide.ratio() > 1.0);
        assert!(AspectRatio::Tall.ratio() < 1.0);
    }
}
