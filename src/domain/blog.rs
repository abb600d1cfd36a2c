use super::Violations;

/// Candidate blog as received from a client, before validation.
#[derive(Debug, Clone, Default)]
pub struct BlogDraft {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i32>,
}

/// A blog that passed validation and may be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlog {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i32,
}

/// Replacement fields for an existing blog. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i32>,
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Checks a creation payload. Missing `likes` defaults to zero.
pub fn validate_new_blog(draft: BlogDraft) -> Result<NewBlog, Violations> {
    let mut violations = Violations::default();

    if is_blank(draft.title.as_deref()) {
        violations.push("title", "title is required");
    }
    if is_blank(draft.author.as_deref()) {
        violations.push("author", "author is required");
    }
    if draft.likes.is_some_and(|likes| likes < 0) {
        violations.push("likes", "likes cannot be negative");
    }

    violations.finish(NewBlog {
        title: draft.title.unwrap_or_default(),
        author: draft.author.unwrap_or_default(),
        url: draft.url.unwrap_or_default(),
        likes: draft.likes.unwrap_or(0),
    })
}

/// Checks an update payload. Only supplied fields are constrained, but a
/// supplied `title` or `author` may not be blank.
pub fn validate_blog_changes(draft: BlogDraft) -> Result<BlogChanges, Violations> {
    let mut violations = Violations::default();

    if draft.title.is_some() && is_blank(draft.title.as_deref()) {
        violations.push("title", "title cannot be empty");
    }
    if draft.author.is_some() && is_blank(draft.author.as_deref()) {
        violations.push("author", "author cannot be empty");
    }
    if draft.likes.is_some_and(|likes| likes < 0) {
        violations.push("likes", "likes cannot be negative");
    }

    violations.finish(BlogChanges {
        title: draft.title,
        author: draft.author,
        url: draft.url,
        likes: draft.likes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: Option<&str>, author: Option<&str>, likes: Option<i32>) -> BlogDraft {
        BlogDraft {
            title: title.map(str::to_string),
            author: author.map(str::to_string),
            url: Some("https://example.com/post".to_string()),
            likes,
        }
    }

    #[test]
    fn new_blog_defaults_likes_to_zero() {
        let blog = validate_new_blog(draft(Some("A"), Some("B"), None)).unwrap();
        assert_eq!(blog.likes, 0);
        assert_eq!(blog.title, "A");
    }

    #[test]
    fn new_blog_keeps_supplied_likes() {
        let blog = validate_new_blog(draft(Some("A"), Some("B"), Some(10))).unwrap();
        assert_eq!(blog.likes, 10);
    }

    #[test]
    fn new_blog_reports_every_missing_field() {
        let violations = validate_new_blog(draft(Some(""), None, Some(-1))).unwrap_err();
        let fields: Vec<&str> = violations.as_slice().iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["title", "author", "likes"]);
    }

    #[test]
    fn whitespace_title_is_blank() {
        assert!(validate_new_blog(draft(Some("   "), Some("B"), None)).is_err());
    }

    #[test]
    fn new_blog_without_url_stores_empty_string() {
        let mut candidate = draft(Some("A"), Some("B"), None);
        candidate.url = None;
        assert_eq!(validate_new_blog(candidate).unwrap().url, "");
    }

    #[test]
    fn changes_keep_absent_fields_absent() {
        let changes = validate_blog_changes(BlogDraft {
            likes: Some(122),
            ..BlogDraft::default()
        })
        .unwrap();
        assert_eq!(changes.likes, Some(122));
        assert!(changes.title.is_none());
    }

    #[test]
    fn changes_reject_blank_title() {
        let violations = validate_blog_changes(BlogDraft {
            title: Some(String::new()),
            ..BlogDraft::default()
        })
        .unwrap_err();
        assert_eq!(violations.as_slice()[0].field, "title");
    }

    #[test]
    fn empty_changes_are_valid() {
        assert_eq!(
            validate_blog_changes(BlogDraft::default()).unwrap(),
            BlogChanges::default()
        );
    }
}
