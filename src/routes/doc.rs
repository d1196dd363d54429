use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        applications::{
            ApplicationHistory, ApplicationList, ApplicationSummary, CreateApplicationRequest,
            TransitionOutcome, UpdateApplicationStatusRequest,
        },
        appointments::{
            AppointmentList, AppointmentView, CreateAppointmentRequest,
            UpdateAppointmentStatusRequest,
        },
        articles::{ArticleList, CreateArticleRequest, UpdateArticleRequest},
        auth::UpdateRoleRequest,
        dashboard::{AdminOverview, Dashboard},
        donations::{CreateDonationRequest, DonationList, DonationView},
        favorites::{FavoriteIds, FavoritePetList, FavoriteState},
        feedback::{CreateFeedbackRequest, FeedbackList, FeedbackView},
        medical::{
            CreateMedicalRecordRequest, CreateReminderRequest, MedicalRecordList, ReminderView,
        },
        pets::{CreatePetRequest, PetDetail, PetList, UpdatePetRequest},
        profile::{ProfileWithRole, UpdateProfileRequest, UserList, UserWithRole},
        store::{
            CheckoutLine, CheckoutRequest, CreateProductRequest, OrderItemView, OrderList,
            OrderSummary, OrderSummaryList, OrderWithItems, ProductList, UpdateOrderStatusRequest,
            UpdateProductRequest,
        },
        volunteers::{
            ActivityList, AssignmentList, AssignmentView, CreateActivityRequest,
            UpdateVolunteerStatusRequest, VolunteerList, VolunteerSignUpRequest, VolunteerView,
        },
    },
    entity::enums::{
        ActivityStatus, ApplicationStatus, AppointmentStatus, AppointmentType, ArticleCategory,
        AssignmentStatus, DonationType, MedicalRecordType, OrderStatus, PetSize, PetStatus,
        ProductCategory, ReminderStatus, Role, Species, VolunteerStatus,
    },
    models::{
        AdoptionApplication, ApplicationStatusEvent, Appointment, Article, Donation, Feedback,
        MedicalRecord, Order, Pet, Product, Profile, VaccinationReminder, Volunteer,
        VolunteerActivity, VolunteerAssignment,
    },
    response::{ApiResponse, Meta},
    routes::{
        admin, applications, appointments, donations, favorites, health, params, pets, profile,
        resources, review, store, vet, volunteer_portal, volunteers,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        pets::list_pets,
        pets::get_pet,
        pets::list_pet_feedback,
        resources::list_articles,
        store::list_products,
        store::get_product,
        store::checkout,
        store::list_orders,
        store::get_order,
        profile::get_profile,
        profile::update_profile,
        profile::dashboard,
        favorites::list_favorites,
        favorites::favorite_ids,
        favorites::add_favorite,
        favorites::remove_favorite,
        favorites::toggle_favorite,
        applications::create_application,
        applications::list_my_applications,
        applications::get_application,
        applications::application_history,
        applications::create_feedback,
        appointments::create_appointment,
        appointments::list_my_appointments,
        appointments::cancel_appointment,
        volunteers::sign_up,
        volunteers::my_application,
        donations::create_donation,
        review::list_applications,
        review::update_application_status,
        vet::list_appointments,
        vet::update_appointment_status,
        vet::list_medical_records,
        vet::create_medical_record,
        vet::create_reminder,
        volunteer_portal::list_open_activities,
        volunteer_portal::sign_up_for_activity,
        volunteer_portal::list_my_assignments,
        volunteer_portal::complete_assignment,
        admin::overview,
        admin::list_pets,
        admin::create_pet,
        admin::update_pet,
        admin::delete_pet,
        admin::list_articles,
        admin::create_article,
        admin::update_article,
        admin::delete_article,
        admin::create_product,
        admin::update_product,
        admin::delete_product,
        admin::list_feedback,
        admin::list_volunteers,
        admin::update_volunteer_status,
        admin::list_activities,
        admin::create_activity,
        admin::list_donations,
        admin::list_users,
        admin::update_user_role,
        admin::list_appointments,
        admin::update_appointment_status,
        admin::list_all_orders,
        admin::get_order_admin,
        admin::update_order_status
    ),
    components(
        schemas(
            Role,
            Species,
            PetSize,
            PetStatus,
            ApplicationStatus,
            AppointmentType,
            AppointmentStatus,
            MedicalRecordType,
            ReminderStatus,
            ProductCategory,
            OrderStatus,
            VolunteerStatus,
            ActivityStatus,
            AssignmentStatus,
            DonationType,
            ArticleCategory,
            Profile,
            Pet,
            AdoptionApplication,
            ApplicationStatusEvent,
            Feedback,
            Appointment,
            MedicalRecord,
            VaccinationReminder,
            Product,
            Order,
            Volunteer,
            VolunteerActivity,
            VolunteerAssignment,
            Donation,
            Article,
            PetList,
            PetDetail,
            CreatePetRequest,
            UpdatePetRequest,
            ApplicationSummary,
            ApplicationList,
            ApplicationHistory,
            CreateApplicationRequest,
            UpdateApplicationStatusRequest,
            TransitionOutcome,
            FavoritePetList,
            FavoriteIds,
            FavoriteState,
            FeedbackView,
            FeedbackList,
            CreateFeedbackRequest,
            AppointmentView,
            AppointmentList,
            CreateAppointmentRequest,
            UpdateAppointmentStatusRequest,
            MedicalRecordList,
            CreateMedicalRecordRequest,
            CreateReminderRequest,
            ReminderView,
            ArticleList,
            CreateArticleRequest,
            UpdateArticleRequest,
            ProductList,
            CreateProductRequest,
            UpdateProductRequest,
            CheckoutLine,
            CheckoutRequest,
            OrderItemView,
            OrderWithItems,
            OrderList,
            OrderSummary,
            OrderSummaryList,
            UpdateOrderStatusRequest,
            VolunteerSignUpRequest,
            UpdateVolunteerStatusRequest,
            VolunteerView,
            VolunteerList,
            CreateActivityRequest,
            ActivityList,
            AssignmentView,
            AssignmentList,
            CreateDonationRequest,
            DonationView,
            DonationList,
            UpdateProfileRequest,
            ProfileWithRole,
            UserWithRole,
            UserList,
            UpdateRoleRequest,
            Dashboard,
            AdminOverview,
            health::HealthData,
            params::Pagination,
            params::SortOrder,
            params::AgeGroup,
            Meta,
            ApiResponse<Pet>,
            ApiResponse<PetList>,
            ApiResponse<PetDetail>,
            ApiResponse<ApplicationList>,
            ApiResponse<TransitionOutcome>,
            ApiResponse<OrderWithItems>,
            ApiResponse<Dashboard>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Pets", description = "Public pet browsing"),
        (name = "Resources", description = "Care articles"),
        (name = "Store", description = "Products, checkout and orders"),
        (name = "Profile", description = "Profile and dashboard"),
        (name = "Favorites", description = "Favorite pets"),
        (name = "Applications", description = "Adoption applications and feedback"),
        (name = "Appointments", description = "Vet appointments"),
        (name = "Volunteers", description = "Volunteer sign-up"),
        (name = "Donations", description = "Donations"),
        (name = "Review", description = "Application review for admins and vets"),
        (name = "Vet", description = "Vet portal"),
        (name = "Volunteer portal", description = "Activities and assignments for volunteers"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
