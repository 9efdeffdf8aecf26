/// Navigation and selection state machine
///
/// Owns the three-level drill-down (home -> stack -> template) plus the
/// active top-level nav category. All transitions go through the methods
/// here so the selection invariants can never be observed broken:
/// - the stack page always has a selected stack,
/// - the template page always has a selected template AND its stack,
/// - a selected template always belongs to the selected stack.

use crate::catalog::{self, Stack, Template};

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Stack,
    Template,
}

/// Top-level nav categories in the header.
///
/// Categories do not filter the catalog; the active one drives header
/// highlighting and resets the drill-down when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCategory {
    Home,
    Marketing,
    Creators,
}

impl NavCategory {
    pub const ALL: [NavCategory; 3] = [
        NavCategory::Home,
        NavCategory::Marketing,
        NavCategory::Creators,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NavCategory::Home => "Home",
            NavCategory::Marketing => "Marketing",
            NavCategory::Creators => "Creators",
        }
    }
}

/// Session navigation state. Created once at startup, mutated only by
/// the transition methods below.
#[derive(Debug, Clone, Copy)]
pub struct NavState {
    page: Page,
    category: NavCategory,
    selected_stack: Option<&'static Stack>,
    selected_template: Option<&'static Template>,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            page: Page::Home,
            category: NavCategory::Home,
            selected_stack: None,
            selected_template: None,
        }
    }
}

impl NavState {
    pub fn page(&self) -> Page {
        self.page
    }

    pub fn category(&self) -> NavCategory {
        self.category
    }

    pub fn stack(&self) -> Option<&'static Stack> {
        self.selected_stack
    }

    pub fn template(&self) -> Option<&'static Template> {
        self.selected_template
    }

    /// Drill into a stack. Leaves the active category untouched.
    pub fn select_stack(&mut self, stack: &'static Stack) {
        self.selected_stack = Some(stack);
        self.selected_template = None;
        self.page = Page::Stack;
    }

    /// Drill into a template, establishing its owning stack as the
    /// selection so the template page is always consistent. Selecting
    /// from the home carousel therefore lands on the template page with
    /// the right stack behind it. A template whose stack is unknown to
    /// the catalog is ignored.
    pub fn select_template(&mut self, template: &'static Template) {
        let owning = match self.selected_stack {
            Some(stack) if stack.id == template.stack_id => Some(stack),
            _ => catalog::stacks().iter().find(|s| s.id == template.stack_id),
        };

        let Some(stack) = owning else {
            tracing::warn!(
                template = template.id,
                stack = template.stack_id,
                "ignoring selection of template with unknown stack"
            );
            return;
        };

        self.selected_stack = Some(stack);
        self.selected_template = Some(template);
        self.page = Page::Template;
    }

    /// Go up exactly one level. From home this is a no-op.
    pub fn go_back(&mut self) {
        match self.page {
            Page::Template => {
                self.selected_template = None;
                self.page = Page::Stack;
            }
            Page::Stack => {
                self.selected_stack = None;
                self.page = Page::Home;
            }
            Page::Home => {}
        }
    }

    /// Switch the top-level category: hard reset of the drill-down back
    /// to home, regardless of current depth.
    pub fn set_category(&mut self, category: NavCategory) {
        self.category = category;
        self.page = Page::Home;
        self.selected_stack = None;
        self.selected_template = None;
    }

    #[cfg(test)]
    fn is_consistent(&self) -> bool {
        match self.page {
            Page::Home => true,
            Page::Stack => self.selected_stack.is_some(),
            Page::Template => match (self.selected_stack, self.selected_template) {
                (Some(stack), Some(template)) => template.stack_id == stack.id,
                _ => false,
            },
        }
    }
}
