pub mod auth_dto;
pub mod exam_dto;
pub mod group_test_dto;
pub mod material_dto;
pub mod upload_dto;
