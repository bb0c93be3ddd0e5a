//! Repository implementation for members.

use diesel::prelude::*;

use crate::{
    domain::{
        member::{Member, NewMember},
        types::MemberId,
    },
    models::member::{Member as DbMember, NewMember as DbNewMember},
    repository::{
        DieselRepository, MemberReader, MemberWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl MemberWriter for DieselRepository {
    fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member> {
        use crate::schema::members;

        let mut conn = self.conn()?;

        let db_new_member: DbNewMember = new_member.into();

        let db_member = diesel::insert_into(members::table)
            .values(&db_new_member)
            .get_result::<DbMember>(&mut conn)?;

        Member::try_from(db_member).map_err(RepositoryError::from)
    }
}

impl MemberReader for DieselRepository {
    fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>> {
        use crate::schema::members;

        let mut conn = self.conn()?;
        let db_member = members::table
            .find(id.get())
            .first::<DbMember>(&mut conn)
            .optional()?;

        db_member
            .map(|member| Member::try_from(member).map_err(RepositoryError::from))
            .transpose()
    }
}
