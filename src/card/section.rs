//! Card sections and their facts and images.

use serde::Serialize;
use tracing::{debug, warn};

use super::{CardError, MAX_POTENTIAL_ACTIONS, PotentialAction};

/// A name/value pair rendered as a labeled field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fact {
    /// Field label
    pub name: String,
    /// Field value
    pub value: String,
}

impl Fact {
    /// Creates a fact. Emptiness is checked when the fact is added to a section.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An image shown in a section gallery or as its hero image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    /// Image URL
    pub image: String,
    /// Alternate text / tooltip
    pub title: String,
}

impl Image {
    /// Creates an image. Emptiness is checked when the image is added to a section.
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            image: url.into(),
            title: title.into(),
        }
    }
}

/// What happened to one image passed to [`Section::add_image`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    /// The image was appended to the section.
    Added,
    /// The image was invalid; nothing after it was added.
    Rejected(CardError),
    /// The image came after a rejected one and was not checked.
    Skipped,
}

/// Per-image report of [`Section::add_image`].
///
/// Images are added in order up to the first invalid one. The report
/// records which images made it in, which one stopped the batch, and which
/// were never attempted.
#[derive(Debug, Default)]
#[must_use]
pub struct ImageBatch {
    outcomes: Vec<ImageOutcome>,
}

impl ImageBatch {
    /// Returns one outcome per submitted image, in submission order.
    pub fn outcomes(&self) -> &[ImageOutcome] {
        &self.outcomes
    }

    /// Returns the number of images that were added.
    #[must_use]
    pub fn admitted(&self) -> usize {
        self.count(|o| matches!(o, ImageOutcome::Added))
    }

    /// Returns the number of images that were not attempted.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ImageOutcome::Skipped))
    }

    /// Returns the index and reason of the image that stopped the batch.
    #[must_use]
    pub fn rejection(&self) -> Option<(usize, &CardError)> {
        self.outcomes.iter().enumerate().find_map(|(i, o)| match o {
            ImageOutcome::Rejected(e) => Some((i, e)),
            _ => None,
        })
    }

    /// Returns true if every submitted image was added.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|o| matches!(o, ImageOutcome::Added))
    }

    /// Converts the report into the rejection, if any.
    ///
    /// Images admitted before the rejection stay in the section.
    ///
    /// # Errors
    ///
    /// Returns the [`CardError`] of the rejected image.
    pub fn into_result(self) -> Result<(), CardError> {
        self.outcomes
            .into_iter()
            .find_map(|o| match o {
                ImageOutcome::Rejected(e) => Some(Err(e)),
                _ => None,
            })
            .unwrap_or(Ok(()))
    }

    fn count(&self, pred: impl Fn(&ImageOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|&o| pred(o)).count()
    }
}

/// A section of a [`MessageCard`](super::MessageCard).
///
/// Sections group a title, text, an activity header, facts, images and
/// actions. Facts and images are only reachable through the validating
/// `add_*` operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    activity_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    activity_subtitle: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    activity_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    activity_image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    hero_image: Option<Image>,

    markdown: bool,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    start_group: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    facts: Vec<Fact>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<Image>,

    #[serde(rename = "potentialAction", skip_serializing_if = "Vec::is_empty")]
    potential_actions: Vec<PotentialAction>,
}

impl Default for Section {
    fn default() -> Self {
        Self::new()
    }
}

impl Section {
    /// Creates an empty section with Markdown rendering enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            text: None,
            activity_title: None,
            activity_subtitle: None,
            activity_text: None,
            activity_image: None,
            hero_image: None,
            markdown: true,
            start_group: false,
            facts: Vec::new(),
            images: Vec::new(),
            potential_actions: Vec::new(),
        }
    }

    /// Sets the section title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the section text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the activity header title, subtitle and text.
    #[must_use]
    pub fn with_activity(
        mut self,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.activity_title = Some(title.into());
        self.activity_subtitle = Some(subtitle.into());
        self.activity_text = Some(text.into());
        self
    }

    /// Sets the activity image URL.
    #[must_use]
    pub fn with_activity_image(mut self, url: impl Into<String>) -> Self {
        self.activity_image = Some(url.into());
        self
    }

    /// Enables or disables Markdown rendering of the section text.
    #[must_use]
    pub const fn with_markdown(mut self, markdown: bool) -> Self {
        self.markdown = markdown;
        self
    }

    /// Draws a separator line above the section.
    #[must_use]
    pub const fn with_start_group(mut self, start_group: bool) -> Self {
        self.start_group = start_group;
        self
    }

    /// Returns the section title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the section text.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the facts in insertion order.
    #[must_use]
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Returns the gallery images in insertion order.
    #[must_use]
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    /// Returns the hero image, if set.
    #[must_use]
    pub const fn hero_image(&self) -> Option<&Image> {
        self.hero_image.as_ref()
    }

    /// Returns the section actions in insertion order.
    #[must_use]
    pub fn potential_actions(&self) -> &[PotentialAction] {
        &self.potential_actions
    }

    /// Adds one or more facts.
    ///
    /// The call is atomic: if any fact has an empty name or value, nothing
    /// is added.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::EmptyFactName`] or [`CardError::EmptyFactValue`]
    /// for the first invalid fact.
    pub fn add_fact(&mut self, facts: impl IntoIterator<Item = Fact>) -> Result<(), CardError> {
        let facts: Vec<Fact> = facts.into_iter().collect();

        for (index, fact) in facts.iter().enumerate() {
            if fact.name.is_empty() {
                return Err(CardError::EmptyFactName { index });
            }
            if fact.value.is_empty() {
                return Err(CardError::EmptyFactValue {
                    index,
                    name: fact.name.clone(),
                });
            }
        }

        debug!(count = facts.len(), "Adding facts to section");
        self.facts.extend(facts);
        Ok(())
    }

    /// Adds a single fact whose value is `values` joined with `", "`.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::EmptyKey`] if `key` is empty, or
    /// [`CardError::NoValues`] if `values` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use teams_notify::card::Section;
    ///
    /// let mut section = Section::new();
    /// section.add_fact_from_key_value("Hosts", &["web-1", "web-2"]).unwrap();
    /// assert_eq!(section.facts()[0].value, "web-1, web-2");
    /// ```
    pub fn add_fact_from_key_value<S: AsRef<str>>(
        &mut self,
        key: &str,
        values: &[S],
    ) -> Result<(), CardError> {
        if key.is_empty() {
            return Err(CardError::EmptyKey);
        }

        if values.is_empty() {
            return Err(CardError::NoValues {
                key: key.to_string(),
            });
        }

        let value = values
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(", ");

        self.facts.push(Fact::new(key, value));
        Ok(())
    }

    /// Adds gallery images.
    ///
    /// Images are appended in order until one has an empty URL or title.
    /// That image and everything after it are left out; images before it
    /// stay added. The returned [`ImageBatch`] records the outcome of every
    /// image.
    pub fn add_image(&mut self, images: impl IntoIterator<Item = Image>) -> ImageBatch {
        let mut batch = ImageBatch::default();
        let mut images = images.into_iter().enumerate();

        for (index, image) in images.by_ref() {
            let error = if image.image.is_empty() {
                CardError::EmptyImageUrl { index }
            } else if image.title.is_empty() {
                CardError::EmptyImageTitle { index }
            } else {
                self.images.push(image);
                batch.outcomes.push(ImageOutcome::Added);
                continue;
            };

            warn!(index, error = %error, "Rejected section image, skipping the rest");
            batch.outcomes.push(ImageOutcome::Rejected(error));
            break;
        }

        batch
            .outcomes
            .extend(images.map(|_| ImageOutcome::Skipped));
        batch
    }

    /// Sets the hero image, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::EmptyHeroImageUrl`] or
    /// [`CardError::EmptyHeroImageTitle`] if either argument is empty; the
    /// current hero image is left untouched.
    pub fn set_hero_image(&mut self, url: &str, title: &str) -> Result<(), CardError> {
        if url.is_empty() {
            return Err(CardError::EmptyHeroImageUrl);
        }

        if title.is_empty() {
            return Err(CardError::EmptyHeroImageTitle);
        }

        self.hero_image = Some(Image::new(url, title));
        Ok(())
    }

    /// Adds one or more actions to this section.
    ///
    /// Teams renders at most [`MAX_POTENTIAL_ACTIONS`] actions; exceeding
    /// that logs a warning but still adds them.
    pub fn add_action(&mut self, actions: impl IntoIterator<Item = PotentialAction>) {
        self.potential_actions.extend(actions);

        if self.potential_actions.len() > MAX_POTENTIAL_ACTIONS {
            warn!(
                count = self.potential_actions.len(),
                max = MAX_POTENTIAL_ACTIONS,
                "Section has more potential actions than Teams renders"
            );
        }
    }
}
