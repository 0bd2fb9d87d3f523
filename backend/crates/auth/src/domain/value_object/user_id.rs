use kernel::id::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserMarker;
pub type UserId = Id<UserMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_from_uuid() {
        let uuid = uuid::Uuid::new_v4();
        let user_id = UserId::from_uuid(uuid);
        assert_eq!(user_id.as_uuid(), &uuid);
    }

    #[test]
    fn test_user_id_display_is_uuid() {
        let uuid = uuid::Uuid::new_v4();
        let user_id = UserId::from_uuid(uuid);
        assert_eq!(user_id.to_string(), uuid.to_string());
    }
}
