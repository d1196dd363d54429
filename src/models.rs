use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    adoption_applications, application_status_events, care_articles, donations,
    enums::{
        ActivityStatus, ApplicationStatus, AppointmentStatus, AppointmentType, ArticleCategory,
        AssignmentStatus, DonationType, MedicalRecordType, OrderStatus, PetSize, PetStatus,
        ProductCategory, ReminderStatus, Role, Species, VolunteerStatus,
    },
    medical_records, pet_feedback, pets, profiles, store_orders, store_products,
    vaccination_reminders, vet_appointments, volunteer_activities, volunteer_assignments,
    volunteers,
};

fn utc(ts: DateTimeWithTimeZone) -> DateTime<Utc> {
    ts.with_timezone(&Utc)
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<profiles::Model> for Profile {
    fn from(model: profiles::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            phone: model.phone,
            address: model.address,
            created_at: utc(model.created_at),
            updated_at: utc(model.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Pet {
    pub id: Uuid,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub size: Option<PetSize>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub health_status: Option<String>,
    pub vaccination_status: Option<String>,
    pub spayed_neutered: Option<bool>,
    pub good_with_kids: Option<bool>,
    pub good_with_pets: Option<bool>,
    pub energy_level: Option<String>,
    pub image_url: Option<String>,
    pub status: PetStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<pets::Model> for Pet {
    fn from(model: pets::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            species: model.species,
            breed: model.breed,
            age: model.age,
            gender: model.gender,
            size: model.size,
            color: model.color,
            description: model.description,
            health_status: model.health_status,
            vaccination_status: model.vaccination_status,
            spayed_neutered: model.spayed_neutered,
            good_with_kids: model.good_with_kids,
            good_with_pets: model.good_with_pets,
            energy_level: model.energy_level,
            image_url: model.image_url,
            status: model.status,
            created_at: utc(model.created_at),
            updated_at: utc(model.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdoptionApplication {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub user_id: Uuid,
    pub home_type: String,
    pub has_yard: bool,
    pub has_other_pets: bool,
    pub has_children: bool,
    pub experience: Option<String>,
    pub reason: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl From<adoption_applications::Model> for AdoptionApplication {
    fn from(model: adoption_applications::Model) -> Self {
        Self {
            id: model.id,
            pet_id: model.pet_id,
            user_id: model.user_id,
            home_type: model.home_type,
            has_yard: model.has_yard,
            has_other_pets: model.has_other_pets,
            has_children: model.has_children,
            experience: model.experience,
            reason: model.reason,
            status: model.status,
            submitted_at: utc(model.submitted_at),
            reviewed_at: model.reviewed_at.map(utc),
            reviewed_by: model.reviewed_by,
            updated_at: utc(model.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationStatusEvent {
    pub id: Uuid,
    pub application_id: Uuid,
    pub from_status: ApplicationStatus,
    pub to_status: ApplicationStatus,
    pub actor_id: Uuid,
    pub actor_role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<application_status_events::Model> for ApplicationStatusEvent {
    fn from(model: application_status_events::Model) -> Self {
        Self {
            id: model.id,
            application_id: model.application_id,
            from_status: model.from_status,
            to_status: model.to_status,
            actor_id: model.actor_id,
            actor_role: model.actor_role,
            created_at: utc(model.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Feedback {
    pub id: Uuid,
    pub adoption_application_id: Uuid,
    pub pet_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<pet_feedback::Model> for Feedback {
    fn from(model: pet_feedback::Model) -> Self {
        Self {
            id: model.id,
            adoption_application_id: model.adoption_application_id,
            pet_id: model.pet_id,
            user_id: model.user_id,
            rating: model.rating,
            comment: model.comment,
            created_at: utc(model.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Appointment {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub user_id: Uuid,
    pub appointment_date: DateTime<Utc>,
    pub appointment_type: AppointmentType,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<vet_appointments::Model> for Appointment {
    fn from(model: vet_appointments::Model) -> Self {
        Self {
            id: model.id,
            pet_id: model.pet_id,
            user_id: model.user_id,
            appointment_date: utc(model.appointment_date),
            appointment_type: model.appointment_type,
            reason: model.reason,
            notes: model.notes,
            status: model.status,
            created_at: utc(model.created_at),
            updated_at: utc(model.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MedicalRecord {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub record_type: MedicalRecordType,
    pub description: String,
    pub date: NaiveDate,
    pub veterinarian: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<medical_records::Model> for MedicalRecord {
    fn from(model: medical_records::Model) -> Self {
        Self {
            id: model.id,
            pet_id: model.pet_id,
            record_type: model.record_type,
            description: model.description,
            date: model.date,
            veterinarian: model.veterinarian,
            created_at: utc(model.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VaccinationReminder {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub user_id: Uuid,
    pub vaccine_name: String,
    pub due_date: NaiveDate,
    pub status: ReminderStatus,
    pub created_at: DateTime<Utc>,
}

impl From<vaccination_reminders::Model> for VaccinationReminder {
    fn from(model: vaccination_reminders::Model) -> Self {
        Self {
            id: model.id,
            pet_id: model.pet_id,
            user_id: model.user_id,
            vaccine_name: model.vaccine_name,
            due_date: model.due_date,
            status: model.status,
            created_at: utc(model.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub category: ProductCategory,
    pub image_url: Option<String>,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

impl From<store_products::Model> for Product {
    fn from(model: store_products::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            category: model.category,
            image_url: model.image_url,
            stock: model.stock,
            created_at: utc(model.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_amount: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<store_orders::Model> for Order {
    fn from(model: store_orders::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            total_amount: model.total_amount,
            status: model.status,
            created_at: utc(model.created_at),
            updated_at: utc(model.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Volunteer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub availability: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub status: VolunteerStatus,
    pub application_date: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl From<volunteers::Model> for Volunteer {
    fn from(model: volunteers::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            availability: model.availability,
            skills: model.skills,
            experience: model.experience,
            status: model.status,
            application_date: utc(model.application_date),
            approved_at: model.approved_at.map(utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VolunteerActivity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub location: Option<String>,
    pub volunteers_needed: i32,
    pub volunteers_assigned: i32,
    pub status: ActivityStatus,
    pub created_at: DateTime<Utc>,
}

impl From<volunteer_activities::Model> for VolunteerActivity {
    fn from(model: volunteer_activities::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            date: model.date,
            time: model.time,
            location: model.location,
            volunteers_needed: model.volunteers_needed,
            volunteers_assigned: model.volunteers_assigned,
            status: model.status,
            created_at: utc(model.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VolunteerAssignment {
    pub id: Uuid,
    pub volunteer_id: Uuid,
    pub activity_id: Uuid,
    pub status: AssignmentStatus,
    pub assigned_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<volunteer_assignments::Model> for VolunteerAssignment {
    fn from(model: volunteer_assignments::Model) -> Self {
        Self {
            id: model.id,
            volunteer_id: model.volunteer_id,
            activity_id: model.activity_id,
            status: model.status,
            assigned_at: utc(model.assigned_at),
            completed_at: model.completed_at.map(utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Donation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: i64,
    pub donation_type: DonationType,
    pub message: Option<String>,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
}

impl From<donations::Model> for Donation {
    fn from(model: donations::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            amount: model.amount,
            donation_type: model.donation_type,
            message: model.message,
            is_anonymous: model.is_anonymous,
            created_at: utc(model.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: ArticleCategory,
    pub image_url: Option<String>,
    pub author: Option<String>,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<care_articles::Model> for Article {
    fn from(model: care_articles::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            category: model.category,
            image_url: model.image_url,
            author: model.author,
            published_at: utc(model.published_at),
            created_at: utc(model.created_at),
        }
    }
}
