use crate::zfs::ValidationResult;

/// Helpers for dataset names like `tank/usr/home@snap`.
pub trait NameExt {
    fn get_pool(&self) -> Option<String>;
    fn get_snapshot(&self) -> Option<String>;
    fn get_bookmark(&self) -> Option<String>;

    fn is_snapshot(&self) -> bool { self.get_snapshot().is_some() }
    fn is_bookmark(&self) -> bool { self.get_bookmark().is_some() }
    fn is_volume_or_dataset(&self) -> bool { !self.is_bookmark() && !self.is_snapshot() }

    fn is_valid(&self) -> bool { self.validate().is_ok() }

    fn validate(&self) -> ValidationResult;
}

impl NameExt for str {
    fn get_pool(&self) -> Option<String> {
        if self.validate().is_err() {
            return None;
        }
        self.split(|c: char| c == '/' || c == '@' || c == '#')
            .next()
            .filter(|pool| !pool.is_empty())
            .map(String::from)
    }

    fn get_snapshot(&self) -> Option<String> { last_component(self).split_once('@').map(|(_, snap)| snap.to_string()) }

    fn get_bookmark(&self) -> Option<String> {
        last_component(self).split_once('#').map(|(_, bookmark)| bookmark.to_string())
    }

    fn validate(&self) -> ValidationResult { crate::zfs::validators::validate_name(self) }
}

impl<S: AsRef<str>> NameExt for S {
    fn get_pool(&self) -> Option<String> { self.as_ref().get_pool() }

    fn get_snapshot(&self) -> Option<String> { self.as_ref().get_snapshot() }

    fn get_bookmark(&self) -> Option<String> { self.as_ref().get_bookmark() }

    fn validate(&self) -> ValidationResult { self.as_ref().validate() }
}

fn last_component(name: &str) -> &str { name.rsplit('/').next().unwrap_or(name) }

/// Join name components with `/`. Empty components and stray slashes are dropped.
///
/// ```rust
/// assert_eq!("tank/usr/home", zetta_ctl::zfs::join(&["tank/", "/usr", "", "home"]));
/// ```
pub fn join<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut name = String::new();
    for part in parts {
        for component in part.as_ref().split('/').filter(|component| !component.is_empty()) {
            if !name.is_empty() {
                name.push('/');
            }
            name.push_str(component);
        }
    }
    name
}
