pub mod adoption_applications;
pub mod application_status_events;
pub mod audit_logs;
pub mod care_articles;
pub mod donations;
pub mod enums;
pub mod medical_records;
pub mod order_items;
pub mod pet_feedback;
pub mod pets;
pub mod profiles;
pub mod store_orders;
pub mod store_products;
pub mod user_favorites;
pub mod user_roles;
pub mod vaccination_reminders;
pub mod vet_appointments;
pub mod volunteer_activities;
pub mod volunteer_assignments;
pub mod volunteers;

pub use adoption_applications::Entity as AdoptionApplications;
pub use application_status_events::Entity as ApplicationStatusEvents;
pub use audit_logs::Entity as AuditLogs;
pub use care_articles::Entity as CareArticles;
pub use donations::Entity as Donations;
pub use medical_records::Entity as MedicalRecords;
pub use order_items::Entity as OrderItems;
pub use pet_feedback::Entity as PetFeedback;
pub use pets::Entity as Pets;
pub use profiles::Entity as Profiles;
pub use store_orders::Entity as StoreOrders;
pub use store_products::Entity as StoreProducts;
pub use user_favorites::Entity as UserFavorites;
pub use user_roles::Entity as UserRoles;
pub use vaccination_reminders::Entity as VaccinationReminders;
pub use vet_appointments::Entity as VetAppointments;
pub use volunteer_activities::Entity as VolunteerActivities;
pub use volunteer_assignments::Entity as VolunteerAssignments;
pub use volunteers::Entity as Volunteers;
